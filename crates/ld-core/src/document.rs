//! The document: layer store + canvas store as one unit of state.
//!
//! Anything that touches both stores at once (history restore, bulk
//! inserts) goes through here so the pair is never observed half-updated.

use crate::canvas::{CanvasState, CanvasStore};
use crate::config::EditorConfig;
use crate::layers::LayerStore;
use crate::model::Layer;
use serde::{Deserialize, Serialize};

/// A deep, independent copy of the document at one instant.
/// Selection is deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub layers: Vec<Layer>,
    pub canvas: CanvasState,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub layers: LayerStore,
    pub canvas: CanvasStore,
}

impl Document {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            layers: LayerStore::new(),
            canvas: CanvasStore::new(config.zoom_limits),
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            layers: self.layers.layers().to_vec(),
            canvas: *self.canvas.state(),
        }
    }

    /// Replace both stores from a snapshot in one step.
    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.layers.replace_layers(snapshot.layers);
        self.canvas.replace_state(snapshot.canvas);
    }

    /// True when the live state equals `snapshot` (selection ignored).
    pub fn matches(&self, snapshot: &DocumentSnapshot) -> bool {
        self.layers.layers() == snapshot.layers.as_slice()
            && *self.canvas.state() == snapshot.canvas
    }
}
