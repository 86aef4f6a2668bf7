//! Layer store: the canonical ordered layer list plus the selection.
//!
//! Every operation addressing an unknown ID or an out-of-range index is a
//! silent no-op. Callers that care validate first with [`LayerStore::contains`]
//! or [`LayerStore::index_of`].

use crate::id::LayerId;
use crate::model::{Layer, LayerPatch};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    /// Back-to-front: index 0 paints first.
    layers: Vec<Layer>,
    /// Selected IDs in selection order; the first one is the primary.
    selected: Vec<LayerId>,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Every ID in the document, including group descendants.
    fn all_ids(&self) -> HashSet<LayerId> {
        self.layers.iter().flat_map(Layer::ids).collect()
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Append a layer on top of the stack. While its ID (or a descendant's)
    /// is already taken, the layer is re-keyed. Selection is untouched.
    pub fn add(&mut self, mut layer: Layer) -> LayerId {
        let taken = self.all_ids();
        while clashes(&layer, &taken) {
            log::debug!("layer id {} already in use, re-keying", layer.id);
            layer.rekey();
        }
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Merge the `Some` fields of `patch` into the layer.
    pub fn update(&mut self, id: LayerId, patch: LayerPatch) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            patch.apply(layer);
        }
    }

    /// Run `f` against the layer for edits a patch can't express
    /// (filters by name, content swaps).
    pub fn modify(&mut self, id: LayerId, f: impl FnOnce(&mut Layer)) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            f(layer);
        }
    }

    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let idx = self.index_of(id)?;
        self.selected.retain(|s| *s != id);
        Some(self.layers.remove(idx))
    }

    /// Splice the layer at `from` out and reinsert it at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.layers.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let layer = self.layers.remove(from);
            self.layers.insert(to, layer);
        }
        true
    }

    /// Clone a layer on top of the stack with fresh IDs, a `" Copy"`
    /// suffix and the position shifted by `offset` on both axes.
    pub fn duplicate(&mut self, id: LayerId, offset: f32) -> Option<LayerId> {
        let copy = self.get(id)?.duplicated(offset);
        Some(self.add(copy))
    }

    /// Swap with the neighbour above. No-op for the top layer.
    pub fn move_up(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                self.layers.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap with the neighbour below. No-op for the bottom layer.
    pub fn move_down(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                self.layers.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Move to the top of the stack; identity if it is already there.
    pub fn bring_to_front(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                let layer = self.layers.remove(idx);
                self.layers.push(layer);
                true
            }
            _ => false,
        }
    }

    /// Move to the bottom of the stack; identity if it is already there.
    pub fn send_to_back(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                let layer = self.layers.remove(idx);
                self.layers.insert(0, layer);
                true
            }
            _ => false,
        }
    }

    /// Drop every layer and the selection.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.selected.clear();
    }

    /// Swap in a whole layer list (history restore). Selection entries that
    /// no longer resolve are pruned.
    pub fn replace_layers(&mut self, layers: Vec<Layer>) {
        self.layers = layers;
        self.prune_selection();
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Selected IDs in selection order.
    pub fn selected_ids(&self) -> &[LayerId] {
        &self.selected
    }

    pub fn primary_selected(&self) -> Option<LayerId> {
        self.selected.first().copied()
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selected.contains(&id)
    }

    /// Live selected layers in store (z) order, not selection order.
    pub fn selected_layers(&self) -> Vec<&Layer> {
        self.layers
            .iter()
            .filter(|l| self.selected.contains(&l.id))
            .collect()
    }

    /// Replace the selection. Unknown IDs and duplicates are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = LayerId>) {
        self.selected.clear();
        for id in ids {
            if self.contains(id) && !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
    }

    pub fn select_only(&mut self, id: LayerId) {
        self.set_selection([id]);
    }

    /// Add `id` to the selection, or remove it if already selected.
    pub fn toggle_selected(&mut self, id: LayerId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else if self.contains(id) {
            self.selected.push(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.layers.iter().map(|l| l.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn prune_selection(&mut self) {
        let live: HashSet<LayerId> = self.layers.iter().map(|l| l.id).collect();
        self.selected.retain(|id| live.contains(id));
    }
}

/// True when any ID in `layer`'s subtree is in `taken` or repeats within it.
fn clashes(layer: &Layer, taken: &HashSet<LayerId>) -> bool {
    let mut seen = HashSet::new();
    layer.ids().into_iter().any(|id| taken.contains(&id) || !seen.insert(id))
}
