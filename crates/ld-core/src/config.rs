//! Editor tuning knobs.

use crate::model::MIN_LAYER_SIZE;

/// Inclusive zoom range of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

/// Configuration shared by the stores, history and interaction layer.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept. Default: **50**.
    pub history_limit: usize,

    pub zoom_limits: ZoomLimits,

    /// Multiplicative zoom factor per wheel notch. Default: **1.05**.
    pub wheel_zoom_step: f32,

    /// Additive zoom step of the zoom in/out buttons. Default: **0.1**.
    pub button_zoom_step: f32,

    /// Offset applied on both axes to duplicated layers. Default: **20**.
    pub duplicate_offset: f32,

    /// Grid spacing used for drawing and snapping. Default: **20**.
    pub grid_size: f32,

    /// Floor applied to width/height when a resize gesture completes.
    pub min_layer_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            zoom_limits: ZoomLimits::default(),
            wheel_zoom_step: 1.05,
            button_zoom_step: 0.1,
            duplicate_offset: 20.0,
            grid_size: 20.0,
            min_layer_size: MIN_LAYER_SIZE,
        }
    }
}
