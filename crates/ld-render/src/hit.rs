//! Hit testing: point → layer lookup.
//!
//! Reverse-walks the layer list (front-to-back) to find which layer is
//! under a canvas-space point. Hidden and locked layers are not
//! interactive and are skipped.

use crate::geometry::Frame;
use kurbo::{Point, Rect};
use ld_core::{Layer, LayerId};

fn interactive(layer: &Layer) -> bool {
    layer.visible && !layer.locked
}

/// Whether a canvas point falls inside the layer's (rotated) box.
pub fn layer_contains(layer: &Layer, p: Point) -> bool {
    let frame = Frame::of(layer);
    frame.local_rect().contains(frame.to_local(p))
}

/// Find the topmost interactive layer at `p`.
/// Returns `None` if only background is hit.
pub fn hit_test(layers: &[Layer], p: Point) -> Option<LayerId> {
    // Last painted = topmost
    layers
        .iter()
        .rev()
        .find(|l| interactive(l) && layer_contains(l, p))
        .map(|l| l.id)
}

/// All interactive layers whose bounds intersect `rect`, back-to-front.
/// Used for marquee (box) selection.
pub fn hit_test_rect(layers: &[Layer], rect: Rect) -> Vec<LayerId> {
    layers
        .iter()
        .filter(|l| interactive(l))
        .filter(|l| {
            let b = Frame::of(l).bounds();
            b.x0 < rect.x1 && b.x1 > rect.x0 && b.y0 < rect.y1 && b.y1 > rect.y0
        })
        .map(|l| l.id)
        .collect()
}
