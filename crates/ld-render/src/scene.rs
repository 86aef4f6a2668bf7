//! Document → renderer-neutral display list.
//!
//! Walks the layer list back-to-front and emits one [`DrawItem`] per
//! visible leaf layer, with group transforms and opacity folded in.
//! A [`SceneRenderer`] turns the list into pixels; this crate never does.

use crate::geometry::{Frame, layer_transform, mirror};
use crate::handles::{Handle, handle_points};
use kurbo::{Affine, Point, Rect, Size};
use ld_core::{BlendMode, Color, Document, Filter, ImageRef, Layer, LayerId, LayerKind};

/// One paint operation: draw `kind` content of `size` through `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// The layer that produced this item (a group child keeps its own id).
    pub id: LayerId,
    pub kind: LayerKind,
    pub src: Option<ImageRef>,
    /// Content-local → canvas, flips included.
    pub transform: Affine,
    pub size: Size,
    /// Effective opacity, multiplied down through groups.
    pub opacity: f32,
    pub blend_mode: BlendMode,
    pub filters: Vec<Filter>,
}

/// Selection chrome for one selected top-level layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutline {
    pub id: LayerId,
    /// Canvas-space corners, clockwise from the box origin.
    pub corners: [Point; 4],
    pub locked: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    /// Canvas → screen (`scale(zoom)` then `translate(pan)`).
    pub view: Affine,
    pub canvas: Rect,
    pub background: Color,
    /// Grid spacing in canvas units, when the grid is shown.
    pub grid: Option<f64>,
    /// Back-to-front.
    pub items: Vec<DrawItem>,
    pub outlines: Vec<SelectionOutline>,
    /// Handles of the single selected, unlocked layer.
    pub handles: Vec<(Handle, Point)>,
}

impl DisplayList {
    pub fn item(&self, id: LayerId) -> Option<&DrawItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// A backend that paints display lists: a 2D canvas, an SVG writer, a GPU
/// scene. Implementations must paint `items` in order.
pub trait SceneRenderer {
    type Error;

    fn render(&mut self, list: &DisplayList) -> Result<(), Self::Error>;
}

/// A frame substituted for a layer's stored geometry, used to preview a
/// transform gesture before it is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub id: LayerId,
    pub frame: Frame,
}

/// Build the display list for the current document state.
pub fn build_display_list(doc: &Document, preview: Option<Preview>, grid_size: f64) -> DisplayList {
    let canvas = doc.canvas.state();
    let zoom = canvas.zoom as f64;
    let view = Affine::translate((canvas.pan_x as f64, canvas.pan_y as f64)) * Affine::scale(zoom);

    let mut items = Vec::with_capacity(doc.layers.len());
    for layer in doc.layers.layers() {
        let (transform, size) = match preview {
            Some(p) if p.id == layer.id => (
                preview_transform(layer, &p.frame),
                Size::new(p.frame.width, p.frame.height),
            ),
            _ => (layer_transform(layer), layer_size(layer)),
        };
        emit(&mut items, layer, transform, size, 1.0);
    }

    let selected = doc.layers.selected_layers();
    let outlines: Vec<SelectionOutline> = selected
        .iter()
        .filter(|l| l.visible)
        .map(|l| SelectionOutline {
            id: l.id,
            corners: frame_for(l, preview).corners(),
            locked: l.locked,
        })
        .collect();

    let handles = match selected.as_slice() {
        [only] if only.visible && !only.locked => {
            handle_points(&frame_for(only, preview), zoom).to_vec()
        }
        _ => Vec::new(),
    };

    log::trace!(
        "display list: {} items, {} selected, zoom {}",
        items.len(),
        outlines.len(),
        canvas.zoom
    );

    DisplayList {
        view,
        canvas: Rect::new(0.0, 0.0, canvas.width as f64, canvas.height as f64),
        background: canvas.background_color,
        grid: canvas.grid_enabled.then_some(grid_size),
        items,
        outlines,
        handles,
    }
}

fn frame_for(layer: &Layer, preview: Option<Preview>) -> Frame {
    match preview {
        Some(p) if p.id == layer.id => p.frame,
        _ => Frame::of(layer),
    }
}

fn preview_transform(layer: &Layer, frame: &Frame) -> Affine {
    frame.transform() * mirror(frame.width, frame.height, layer.flip_x, layer.flip_y)
}

fn layer_size(layer: &Layer) -> Size {
    Size::new(layer.width as f64, layer.height as f64)
}

fn emit(
    items: &mut Vec<DrawItem>,
    layer: &Layer,
    transform: Affine,
    size: Size,
    parent_opacity: f32,
) {
    if !layer.visible {
        return;
    }
    let opacity = parent_opacity * layer.opacity;
    if layer.kind() == LayerKind::Group {
        // Children are positioned in the group's content space.
        for child in layer.children() {
            emit(items, child, transform * layer_transform(child), layer_size(child), opacity);
        }
        return;
    }
    items.push(DrawItem {
        id: layer.id,
        kind: layer.kind(),
        src: layer.src().cloned(),
        transform,
        size,
        opacity,
        blend_mode: layer.blend_mode,
        filters: layer.filters.to_vec(),
    });
}
