//! Transform handles: the 8 resize anchors and the rotate knob drawn
//! around a selected layer, plus the frame math for dragging them.
//!
//! Handle positions live in canvas space but their hit radius and the
//! rotate knob offset are fixed in screen pixels, so both scale with
//! `1 / zoom`.

use crate::geometry::Frame;
use kurbo::{Affine, Point};

/// Hit radius of a handle, in screen pixels.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Distance of the rotate knob above the top edge, in screen pixels.
pub const ROTATE_OFFSET: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Rotate,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
        Handle::Rotate,
    ];

    /// Position on the box in unit coordinates, `None` for the rotate knob.
    fn anchor(self) -> Option<(f64, f64)> {
        match self {
            Handle::TopLeft => Some((0.0, 0.0)),
            Handle::Top => Some((0.5, 0.0)),
            Handle::TopRight => Some((1.0, 0.0)),
            Handle::Right => Some((1.0, 0.5)),
            Handle::BottomRight => Some((1.0, 1.0)),
            Handle::Bottom => Some((0.5, 1.0)),
            Handle::BottomLeft => Some((0.0, 1.0)),
            Handle::Left => Some((0.0, 0.5)),
            Handle::Rotate => None,
        }
    }

    pub fn is_rotate(self) -> bool {
        self == Handle::Rotate
    }

    /// Which box edges this handle drags: (left, top, right, bottom).
    fn edges(self) -> (bool, bool, bool, bool) {
        match self {
            Handle::TopLeft => (true, true, false, false),
            Handle::Top => (false, true, false, false),
            Handle::TopRight => (false, true, true, false),
            Handle::Right => (false, false, true, false),
            Handle::BottomRight => (false, false, true, true),
            Handle::Bottom => (false, false, false, true),
            Handle::BottomLeft => (true, false, false, true),
            Handle::Left => (true, false, false, false),
            Handle::Rotate => (false, false, false, false),
        }
    }
}

/// Canvas-space positions of every handle of `frame` at the given zoom.
pub fn handle_points(frame: &Frame, zoom: f64) -> [(Handle, Point); 9] {
    let t = frame.transform();
    Handle::ALL.map(|h| {
        let local = match h.anchor() {
            Some((u, v)) => Point::new(u * frame.width, v * frame.height),
            None => Point::new(frame.width / 2.0, -ROTATE_OFFSET / zoom),
        };
        (h, t * local)
    })
}

/// The handle under a canvas point, if any. The rotate knob wins ties.
pub fn handle_at(frame: &Frame, p: Point, zoom: f64) -> Option<Handle> {
    let radius = HANDLE_RADIUS / zoom;
    handle_points(frame, zoom)
        .into_iter()
        .rev()
        .find(|(_, hp)| (*hp - p).hypot() <= radius)
        .map(|(h, _)| h)
}

/// Drag a resize handle to `pointer`. The edges the handle does not own
/// stay fixed in the box's own (rotated) frame, and the dragged edges stop
/// `min` units short of crossing them.
pub fn resize_frame(base: Frame, handle: Handle, pointer: Point, min: f64) -> Frame {
    let (drag_left, drag_top, drag_right, drag_bottom) = handle.edges();
    let q = base.to_local(pointer);

    let mut left = 0.0;
    let mut top = 0.0;
    let mut right = base.width;
    let mut bottom = base.height;
    if drag_left {
        left = q.x.min(right - min);
    }
    if drag_right {
        right = q.x.max(left + min);
    }
    if drag_top {
        top = q.y.min(bottom - min);
    }
    if drag_bottom {
        bottom = q.y.max(top + min);
    }

    let origin = base.transform() * Point::new(left, top);
    Frame {
        x: origin.x,
        y: origin.y,
        width: right - left,
        height: bottom - top,
        rotation: base.rotation,
    }
}

/// Drag the rotate knob to `pointer`: the box turns about its center so
/// the knob points at the pointer.
pub fn rotate_frame(base: Frame, pointer: Point) -> Frame {
    let c = base.center();
    let rotation = (pointer.y - c.y).atan2(pointer.x - c.x).to_degrees() + 90.0;
    let half = Point::new(base.width / 2.0, base.height / 2.0);
    let offset = Affine::rotate(rotation.to_radians()) * half;
    Frame {
        x: c.x - offset.x,
        y: c.y - offset.y,
        rotation,
        ..base
    }
}
