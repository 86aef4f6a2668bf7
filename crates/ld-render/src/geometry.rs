//! Layer geometry: canvas-space transforms for stored layer fields.
//!
//! A layer's box is `[0, width] × [0, height]` in local space. It is placed
//! by rotating around its stored origin `(x, y)`:
//!
//! ```text
//! layer_transform = translate(x, y) · rotate(rotation) · mirror
//! ```
//!
//! `mirror` flips the content inside its own box (`translate(w, 0) ·
//! scale(-1, 1)` for `flip_x`), so flipping never moves the box, with or
//! without rotation. Renderers that position a node by its mirrored origin
//! (the corner local `(0, 0)` maps to) use [`node_origin`] /
//! [`origin_from_node`] to convert.

use kurbo::{Affine, Point, Rect};
use ld_core::Layer;

/// Position, size and rotation of a layer box, without flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

impl Frame {
    pub fn of(layer: &Layer) -> Self {
        Self {
            x: layer.x as f64,
            y: layer.y as f64,
            width: layer.width as f64,
            height: layer.height as f64,
            rotation: layer.rotation as f64,
        }
    }

    /// Box-local → canvas, ignoring flips.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::rotate(self.rotation.to_radians())
    }

    pub fn local_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.transform() * Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Canvas point → box-local point.
    pub fn to_local(&self, p: Point) -> Point {
        self.transform().inverse() * p
    }

    /// The four corners in canvas space, clockwise from the origin.
    pub fn corners(&self) -> [Point; 4] {
        let t = self.transform();
        [
            t * Point::new(0.0, 0.0),
            t * Point::new(self.width, 0.0),
            t * Point::new(self.width, self.height),
            t * Point::new(0.0, self.height),
        ]
    }

    /// Axis-aligned bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        self.transform().transform_rect_bbox(self.local_rect())
    }
}

/// Mirror inside a `width × height` box.
pub fn mirror(width: f64, height: f64, flip_x: bool, flip_y: bool) -> Affine {
    let (sx, tx) = if flip_x { (-1.0, width) } else { (1.0, 0.0) };
    let (sy, ty) = if flip_y { (-1.0, height) } else { (1.0, 0.0) };
    Affine::new([sx, 0.0, 0.0, sy, tx, ty])
}

/// Content-local → canvas transform, flips included.
pub fn layer_transform(layer: &Layer) -> Affine {
    let frame = Frame::of(layer);
    frame.transform() * mirror(frame.width, frame.height, layer.flip_x, layer.flip_y)
}

/// Where content-local `(0, 0)` lands in canvas space.
pub fn node_origin(layer: &Layer) -> Point {
    layer_transform(layer) * Point::ORIGIN
}

/// Invert [`node_origin`]: the stored `(x, y)` of a box of the given size,
/// rotation and flips whose mirrored origin sits at `node`.
pub fn origin_from_node(
    node: Point,
    width: f64,
    height: f64,
    rotation: f64,
    flip_x: bool,
    flip_y: bool,
) -> Point {
    let offset = Point::new(
        if flip_x { width } else { 0.0 },
        if flip_y { height } else { 0.0 },
    );
    let rotated = Affine::rotate(rotation.to_radians()) * offset;
    node - rotated.to_vec2()
}

/// Axis-aligned bounds of a layer in canvas space.
pub fn layer_bounds(layer: &Layer) -> Rect {
    Frame::of(layer).bounds()
}
