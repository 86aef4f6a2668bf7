pub mod canvas;
pub mod config;
pub mod document;
pub mod id;
pub mod layers;
pub mod model;

pub use canvas::{CANVAS_PRESETS, CanvasPreset, CanvasState, CanvasStore, ZoomDirection};
pub use config::{EditorConfig, ZoomLimits};
pub use document::{Document, DocumentSnapshot};
pub use id::LayerId;
pub use layers::LayerStore;
pub use model::*;
