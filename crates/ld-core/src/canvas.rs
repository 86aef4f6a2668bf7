//! Canvas and viewport state.
//!
//! The canvas is the virtual drawing surface (size + background). The
//! viewport maps canvas space to screen space: `screen = canvas * zoom + pan`.

use crate::config::ZoomLimits;
use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Wheel direction for [`CanvasStore::zoom_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Snapshot-able canvas + view state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    pub width: f32,
    pub height: f32,
    pub background_color: Color,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub grid_enabled: bool,
    pub snap_enabled: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background_color: Color::rgba(26.0 / 255.0, 26.0 / 255.0, 31.0 / 255.0, 1.0),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            grid_enabled: false,
            snap_enabled: true,
        }
    }
}

/// A named canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPreset {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub ratio: &'static str,
}

pub const CANVAS_PRESETS: [CanvasPreset; 8] = [
    CanvasPreset::new("Instagram Post", 1080.0, 1080.0, "1:1"),
    CanvasPreset::new("Instagram Story", 1080.0, 1920.0, "9:16"),
    CanvasPreset::new("LinkedIn Banner", 1584.0, 396.0, "4:1"),
    CanvasPreset::new("Facebook Cover", 820.0, 312.0, "2.63:1"),
    CanvasPreset::new("Twitter Header", 1500.0, 500.0, "3:1"),
    CanvasPreset::new("YouTube Thumbnail", 1280.0, 720.0, "16:9"),
    CanvasPreset::new("HD (16:9)", 1920.0, 1080.0, "16:9"),
    CanvasPreset::new("Square (1:1)", 1000.0, 1000.0, "1:1"),
];

impl CanvasPreset {
    const fn new(name: &'static str, width: f32, height: f32, ratio: &'static str) -> Self {
        Self {
            name,
            width,
            height,
            ratio,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanvasStore {
    state: CanvasState,
    limits: ZoomLimits,
}

impl CanvasStore {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            state: CanvasState::default(),
            limits,
        }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn zoom(&self) -> f32 {
        self.state.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.state.pan_x, self.state.pan_y)
    }

    /// Replace the whole state (history restore). Zoom is re-clamped.
    pub fn replace_state(&mut self, state: CanvasState) {
        self.state = state;
        self.state.zoom = self.limits.clamp(state.zoom);
    }

    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.state.width = width;
        self.state.height = height;
    }

    pub fn apply_preset(&mut self, preset: &CanvasPreset) {
        self.set_canvas_size(preset.width, preset.height);
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.state.background_color = color;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.state.zoom = self.limits.clamp(zoom);
    }

    pub fn set_pan(&mut self, x: f32, y: f32) {
        self.state.pan_x = x;
        self.state.pan_y = y;
    }

    pub fn toggle_grid(&mut self) {
        self.state.grid_enabled = !self.state.grid_enabled;
    }

    pub fn toggle_snap(&mut self) {
        self.state.snap_enabled = !self.state.snap_enabled;
    }

    /// Back to 100% at the origin. Canvas size and background are kept.
    pub fn reset_view(&mut self) {
        self.state.zoom = 1.0;
        self.state.pan_x = 0.0;
        self.state.pan_y = 0.0;
    }

    /// Additive zoom step, clamped.
    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.state.zoom + delta);
    }

    /// Toolbar zoom-in button.
    pub fn zoom_in(&mut self, step: f32) {
        self.zoom_by(step);
    }

    pub fn zoom_out(&mut self, step: f32) {
        self.zoom_by(-step);
    }

    pub fn screen_to_canvas(&self, sx: f32, sy: f32) -> (f32, f32) {
        let z = self.state.zoom;
        ((sx - self.state.pan_x) / z, (sy - self.state.pan_y) / z)
    }

    pub fn canvas_to_screen(&self, cx: f32, cy: f32) -> (f32, f32) {
        let z = self.state.zoom;
        (cx * z + self.state.pan_x, cy * z + self.state.pan_y)
    }

    /// Zoom one wheel notch while keeping the canvas point under the
    /// pointer pinned to the same screen position.
    pub fn zoom_at(&mut self, pointer: (f32, f32), direction: ZoomDirection, step: f32) {
        let (cx, cy) = self.screen_to_canvas(pointer.0, pointer.1);
        let target = match direction {
            ZoomDirection::In => self.state.zoom * step,
            ZoomDirection::Out => self.state.zoom / step,
        };
        self.set_zoom(target);
        // Re-anchor with the clamped zoom, so the pin holds at the limits too.
        let z1 = self.state.zoom;
        self.set_pan(pointer.0 - cx * z1, pointer.1 - cy * z1);
    }

    /// Zoom as a whole percentage, e.g. `"105%"`.
    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.state.zoom * 100.0).round() as i32)
    }
}
