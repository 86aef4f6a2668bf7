//! Layer actions triggered from the toolbar, the layer panel and shortcuts.
//!
//! Each action that changes the document ends with exactly one
//! [`Editor::commit`]. Selection-wide actions on an empty selection, and
//! actions that leave the document unchanged, record nothing. Every action
//! returns whether it recorded.

use crate::editor::Editor;
use ld_core::{LayerId, LayerPatch};

impl Editor {
    /// Selected IDs in store (z) order, back to front.
    fn selection_in_z_order(&self) -> Vec<LayerId> {
        self.document.layers.selected_layers().iter().map(|l| l.id).collect()
    }

    pub fn flip_horizontal(&mut self) -> bool {
        self.for_each_selected("Flip horizontal", |editor, id| {
            editor.document.layers.modify(id, |l| l.flip_x = !l.flip_x);
        })
    }

    pub fn flip_vertical(&mut self) -> bool {
        self.for_each_selected("Flip vertical", |editor, id| {
            editor.document.layers.modify(id, |l| l.flip_y = !l.flip_y);
        })
    }

    /// Remove every selected layer.
    pub fn delete_selected(&mut self) -> bool {
        let ids = self.selection_in_z_order();
        if ids.is_empty() {
            return false;
        }
        for id in ids {
            self.document.layers.remove(id);
        }
        self.document.layers.clear_selection();
        self.commit("Delete layer")
    }

    /// Copy every selected layer on top of the stack. The selection stays
    /// on the originals.
    pub fn duplicate_selected(&mut self) -> bool {
        let offset = self.config.duplicate_offset;
        self.for_each_selected("Duplicate layer", |editor, id| {
            editor.document.layers.duplicate(id, offset);
        })
    }

    /// Selected layers to the top, keeping their relative order.
    pub fn bring_selected_to_front(&mut self) -> bool {
        self.for_each_selected("Bring to front", |editor, id| {
            editor.document.layers.bring_to_front(id);
        })
    }

    /// Selected layers to the bottom, keeping their relative order.
    pub fn send_selected_to_back(&mut self) -> bool {
        let ids = self.selection_in_z_order();
        self.apply_in_order(ids.into_iter().rev(), "Send to back", |editor, id| {
            editor.document.layers.send_to_back(id);
        })
    }

    /// One step forward. A selected block moves together; it stops when
    /// its top member reaches the front.
    pub fn move_selected_up(&mut self) -> bool {
        let ids = self.selection_in_z_order();
        self.apply_in_order(ids.into_iter().rev(), "Move layer up", |editor, id| {
            let store = &editor.document.layers;
            let blocked = store
                .index_of(id)
                .and_then(|i| store.layers().get(i + 1))
                .is_some_and(|above| store.is_selected(above.id));
            if !blocked {
                editor.document.layers.move_up(id);
            }
        })
    }

    /// One step backward; mirror of [`Editor::move_selected_up`].
    pub fn move_selected_down(&mut self) -> bool {
        let ids = self.selection_in_z_order();
        self.apply_in_order(ids, "Move layer down", |editor, id| {
            let store = &editor.document.layers;
            let blocked = store
                .index_of(id)
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| store.layers().get(i))
                .is_some_and(|below| store.is_selected(below.id));
            if !blocked {
                editor.document.layers.move_down(id);
            }
        })
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> bool {
        self.edit_layer(id, "Toggle visibility", |editor| {
            editor.document.layers.modify(id, |l| l.visible = !l.visible);
        })
    }

    pub fn toggle_lock(&mut self, id: LayerId) -> bool {
        self.edit_layer(id, "Toggle lock", |editor| {
            editor.document.layers.modify(id, |l| l.locked = !l.locked);
        })
    }

    /// Rename to the trimmed `name`. Blank names are rejected.
    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.edit_layer(id, "Rename layer", |editor| {
            editor.document.layers.update(
                id,
                LayerPatch {
                    name: Some(name.to_string()),
                    ..LayerPatch::default()
                },
            );
        })
    }

    /// Property-panel edit (opacity, blend mode, geometry, filters...).
    pub fn update_layer(&mut self, id: LayerId, patch: LayerPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        self.edit_layer(id, "Update layer", |editor| {
            editor.document.layers.update(id, patch);
        })
    }

    /// Set one named filter value (clamped to its preset range).
    pub fn set_layer_filter(&mut self, id: LayerId, name: &str, value: f32) -> bool {
        self.edit_layer(id, "Update layer", |editor| {
            editor.document.layers.modify(id, |l| l.set_filter(name, value));
        })
    }

    fn edit_layer(&mut self, id: LayerId, action: &str, f: impl FnOnce(&mut Editor)) -> bool {
        if !self.document.layers.contains(id) {
            return false;
        }
        f(self);
        self.commit(action)
    }

    fn for_each_selected(&mut self, action: &str, f: impl FnMut(&mut Editor, LayerId)) -> bool {
        let ids = self.selection_in_z_order();
        self.apply_in_order(ids, action, f)
    }

    fn apply_in_order(
        &mut self,
        ids: impl IntoIterator<Item = LayerId>,
        action: &str,
        mut f: impl FnMut(&mut Editor, LayerId),
    ) -> bool {
        let mut any = false;
        for id in ids {
            f(self, id);
            any = true;
        }
        any && self.commit(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::{ImageRef, Layer};
    use pretty_assertions::assert_eq;

    fn editor_with(names: &[&str]) -> (Editor, Vec<LayerId>) {
        let mut editor = Editor::default();
        let layers = names
            .iter()
            .map(|n| Layer::image(*n, ImageRef::new(format!("{n}.png")), 100.0, 100.0))
            .collect();
        let ids = editor.insert_batch(layers, "Add layers");
        (editor, ids)
    }

    fn names(editor: &Editor) -> Vec<String> {
        editor.document.layers.layers().iter().map(|l| l.name.clone()).collect()
    }

    #[test]
    fn empty_selection_records_nothing() {
        let (mut editor, _) = editor_with(&["a"]);
        let before = editor.history.past_len();
        assert!(!editor.flip_horizontal());
        assert!(!editor.delete_selected());
        assert!(!editor.duplicate_selected());
        assert!(!editor.bring_selected_to_front());
        assert_eq!(editor.history.past_len(), before);
    }

    #[test]
    fn flip_is_one_record_for_many_layers() {
        let (mut editor, ids) = editor_with(&["a", "b"]);
        editor.document.layers.select_all();
        let before = editor.history.past_len();
        assert!(editor.flip_horizontal());
        assert_eq!(editor.history.past_len(), before + 1);
        assert!(ids.iter().all(|id| editor.document.layers.get(*id).is_some_and(|l| l.flip_x)));

        editor.flip_horizontal();
        assert!(ids.iter().all(|id| editor.document.layers.get(*id).is_some_and(|l| !l.flip_x)));
    }

    #[test]
    fn delete_clears_selection() {
        let (mut editor, ids) = editor_with(&["a", "b", "c"]);
        editor.document.layers.set_selection([ids[0], ids[2]]);
        assert!(editor.delete_selected());
        assert_eq!(names(&editor), vec!["b"]);
        assert!(editor.document.layers.selected_ids().is_empty());
        assert_eq!(editor.history.undo_label(), Some("Delete layer"));
    }

    #[test]
    fn duplicate_appends_copies() {
        let (mut editor, ids) = editor_with(&["a", "b"]);
        editor.document.layers.set_selection(ids.clone());
        editor.duplicate_selected();
        assert_eq!(names(&editor), vec!["a", "b", "a Copy", "b Copy"]);
        let copy = &editor.document.layers.layers()[2];
        assert_eq!((copy.x, copy.y), (20.0, 20.0));
        assert_eq!(editor.document.layers.selected_ids(), ids.as_slice());
    }

    #[test]
    fn front_and_back_keep_relative_order() {
        let (mut editor, ids) = editor_with(&["a", "b", "c", "d"]);
        editor.document.layers.set_selection([ids[0], ids[2]]);
        editor.bring_selected_to_front();
        assert_eq!(names(&editor), vec!["b", "d", "a", "c"]);
        editor.send_selected_to_back();
        assert_eq!(names(&editor), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn selected_block_moves_together() {
        let (mut editor, ids) = editor_with(&["a", "b", "c"]);
        editor.document.layers.set_selection([ids[0], ids[1]]);
        editor.move_selected_up();
        assert_eq!(names(&editor), vec!["c", "a", "b"]);
        editor.move_selected_up();
        assert_eq!(names(&editor), vec!["c", "a", "b"]);
        editor.move_selected_down();
        assert_eq!(names(&editor), vec!["a", "b", "c"]);
    }

    #[test]
    fn panel_actions_record_once() {
        let (mut editor, ids) = editor_with(&["a"]);
        let id = ids[0];
        assert!(editor.toggle_visibility(id));
        assert!(editor.toggle_lock(id));
        assert!(editor.rename_layer(id, "  Sky  "));
        assert!(!editor.rename_layer(id, "   "));
        assert!(editor.set_layer_filter(id, "blur", 50.0));

        let layer = editor.document.layers.get(id).cloned();
        assert_eq!(layer.as_ref().map(|l| l.name.as_str()), Some("Sky"));
        assert_eq!(layer.as_ref().map(|l| (l.visible, l.locked)), Some((false, true)));
        assert_eq!(layer.as_ref().and_then(|l| l.filter("blur")), Some(20.0));

        let labels: Vec<&str> = editor.history.entries().map(|e| e.action.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "New document",
                "Add layers",
                "Toggle visibility",
                "Toggle lock",
                "Rename layer",
                "Update layer",
            ]
        );
    }

    #[test]
    fn identity_reorder_is_not_undoable() {
        let (mut editor, ids) = editor_with(&["a", "b"]);
        editor.reset_history();
        editor.document.layers.select_only(ids[1]);

        assert!(!editor.bring_selected_to_front());
        assert!(!editor.move_selected_up());
        assert_eq!(editor.history.undo_label(), None);
        assert_eq!(editor.history.can_undo(), editor.undo().is_some());
        assert_eq!(names(&editor), vec!["a", "b"]);

        assert!(editor.send_selected_to_back());
        assert_eq!(editor.history.undo_label(), Some("Send to back"));
        assert_eq!(editor.history.can_undo(), editor.undo().is_some());
    }

    #[test]
    fn unknown_id_is_noop() {
        let (mut editor, _) = editor_with(&["a"]);
        let ghost = LayerId::intern("ghost");
        assert!(!editor.toggle_lock(ghost));
        assert!(!editor.update_layer(ghost, LayerPatch::position(1.0, 1.0)));
        assert!(!editor.update_layer(editor.document.layers.layers()[0].id, LayerPatch::default()));
    }
}
