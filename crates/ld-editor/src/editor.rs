//! The editing session: one document plus its history.
//!
//! All mutation happens on a single logical thread through `&mut Editor`.
//! Actions mutate `document` first and then call [`Editor::commit`] once,
//! so each user-visible action becomes exactly one history entry.

use crate::history::History;
use kurbo::Point;
use ld_core::{Document, EditorConfig, ImageRef, Layer, LayerId};
use ld_render::scene::{DisplayList, Preview, build_display_list};

pub struct Editor {
    pub document: Document,
    pub history: History,
    pub config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Empty document whose initial state is the first history entry.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::new(&config), config)
    }

    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        let mut history = History::new(config.history_limit);
        history.record(&document, "New document");
        Self {
            document,
            history,
            config,
        }
    }

    /// Log the current document state as one undo step. Returns false when
    /// the action left the document unchanged and nothing was logged.
    pub fn commit(&mut self, action: &str) -> bool {
        self.history.record(&self.document, action)
    }

    /// Whether [`Editor::undo`] would change the document.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo_from(&self.document)
    }

    pub fn undo(&mut self) -> Option<String> {
        self.history.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.history.redo(&mut self.document)
    }

    /// Forget all history; the current state becomes the new baseline.
    pub fn reset_history(&mut self) {
        self.history.clear();
        self.commit("New document");
    }

    /// Add one layer and record it.
    pub fn add_layer(&mut self, layer: Layer, action: &str) -> LayerId {
        let id = self.document.layers.add(layer);
        self.commit(action);
        id
    }

    /// Add an image layer of the given natural size at `at`, recorded as
    /// `action`.
    pub fn add_image_layer(
        &mut self,
        name: &str,
        src: ImageRef,
        size: (u32, u32),
        at: Point,
        action: &str,
    ) -> LayerId {
        let layer = Layer::image(name, src, size.0 as f32, size.1 as f32)
            .at(at.x as f32, at.y as f32);
        self.add_layer(layer, action)
    }

    /// Append several layers in order (last = front-most) under a single
    /// history entry. An empty batch records nothing.
    pub fn insert_batch(&mut self, layers: Vec<Layer>, action: &str) -> Vec<LayerId> {
        if layers.is_empty() {
            return Vec::new();
        }
        let ids = layers
            .into_iter()
            .map(|l| self.document.layers.add(l))
            .collect();
        self.commit(action);
        ids
    }

    pub fn display_list(&self, preview: Option<Preview>) -> DisplayList {
        build_display_list(&self.document, preview, self.config.grid_size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn img(name: &str) -> Layer {
        Layer::image(name, ImageRef::new(format!("{name}.png")), 64.0, 64.0)
    }

    #[test]
    fn new_editor_has_baseline_only() {
        let editor = Editor::default();
        assert_eq!(editor.history.past_len(), 1);
        assert!(!editor.history.can_undo());
        assert!(editor.document.layers.is_empty());
    }

    #[test]
    fn batch_is_one_undo_step() {
        let mut editor = Editor::default();
        let ids = editor.insert_batch(vec![img("a"), img("b"), img("c")], "Add 3 layers");
        assert_eq!(ids.len(), 3);
        assert_eq!(editor.document.layers.layers().last().map(|l| l.id), ids.last().copied());
        assert_eq!(editor.history.past_len(), 2);

        assert_eq!(editor.undo().as_deref(), Some("Add 3 layers"));
        assert!(editor.document.layers.is_empty());
    }

    #[test]
    fn empty_batch_records_nothing() {
        let mut editor = Editor::default();
        assert!(editor.insert_batch(Vec::new(), "nothing").is_empty());
        assert_eq!(editor.history.past_len(), 1);
    }

    #[test]
    fn add_image_layer_places_and_sizes() {
        let mut editor = Editor::default();
        let id = editor.add_image_layer(
            "photo",
            ImageRef::new("p.png"),
            (640, 480),
            Point::new(100.0, 100.0),
            "Add image",
        );
        let layer = editor.document.layers.get(id).cloned();
        assert_eq!(
            layer.as_ref().map(|l| (l.x, l.y, l.width, l.height)),
            Some((100.0, 100.0, 640.0, 480.0))
        );
        assert_eq!(editor.history.undo_label(), Some("Add image"));
    }

    #[test]
    fn reset_history_keeps_document() {
        let mut editor = Editor::default();
        editor.add_layer(img("a"), "Add image");
        editor.reset_history();
        assert_eq!(editor.history.past_len(), 1);
        assert_eq!(editor.undo(), None);
        assert_eq!(editor.document.layers.len(), 1);
    }

    #[test]
    fn can_undo_counts_unrecorded_drift() {
        let mut editor = Editor::default();
        assert!(!editor.can_undo());
        editor.document.canvas.set_zoom(2.0);
        assert!(editor.can_undo());
        assert!(editor.undo().is_some());
        assert!(!editor.can_undo());
    }
}
