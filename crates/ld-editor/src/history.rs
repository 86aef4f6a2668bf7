//! Snapshot-based undo/redo history.
//!
//! Every committed action is logged *after* it mutates the document:
//! `record` deep-copies the live layers + canvas into a new entry, so the
//! newest past entry normally equals the live state. Undo walks back to the
//! most recent entry that differs from the live state and restores it; the
//! live state is pushed to `future` first so redo can bring it back.
//!
//! Both stores are replaced in one [`Document::restore`] call.

use ld_core::{Document, DocumentSnapshot};
use std::collections::VecDeque;
use std::time::SystemTime;

/// One logged document state.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Monotonic per-history sequence number.
    pub seq: u64,
    /// Label shown in the history panel, e.g. `"Move layer"`.
    pub action: String,
    pub timestamp: SystemTime,
    pub snapshot: DocumentSnapshot,
}

pub struct History {
    past: VecDeque<HistoryEntry>,
    future: Vec<HistoryEntry>,
    /// Maximum number of past entries.
    max_depth: usize,
    next_seq: u64,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(max_depth.min(64)),
            future: Vec::new(),
            max_depth: max_depth.max(1),
            next_seq: 0,
        }
    }

    fn entry(&mut self, doc: &Document, action: &str) -> HistoryEntry {
        let seq = self.next_seq;
        self.next_seq += 1;
        HistoryEntry {
            seq,
            action: action.to_string(),
            timestamp: SystemTime::now(),
            snapshot: doc.snapshot(),
        }
    }

    /// Log the live document state under `action`. A state equal to the
    /// newest entry is not logged again, so adjacent entries always differ.
    /// Returns whether an entry was added.
    pub fn record(&mut self, doc: &Document, action: &str) -> bool {
        self.future.clear();
        if self.past.back().is_some_and(|top| doc.matches(&top.snapshot)) {
            log::debug!("history: {action:?} changed nothing, not recorded");
            return false;
        }

        let entry = self.entry(doc, action);
        log::debug!("history: record #{} {:?}", entry.seq, entry.action);
        self.past.push_back(entry);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        true
    }

    /// Step back to the latest logged state that differs from the live one.
    /// Returns the label of the action that was undone, or `None` when there
    /// is nothing to undo (the document is left untouched).
    pub fn undo(&mut self, doc: &mut Document) -> Option<String> {
        let target = self.past.iter().rposition(|e| !doc.matches(&e.snapshot))?;

        // Entries above the target equal the live state; the newest of them
        // names the action being undone.
        let mut undone = None;
        while self.past.len() > target + 1 {
            if let Some(e) = self.past.pop_back() {
                undone.get_or_insert(e.action);
            }
        }
        let label = undone.unwrap_or_else(|| "Unrecorded changes".to_string());

        let current = self.entry(doc, &label);
        self.future.push(current);

        let snapshot = self.past[target].snapshot.clone();
        doc.restore(snapshot);
        log::debug!("history: undo {label:?} -> #{}", self.past[target].seq);
        Some(label)
    }

    /// Re-apply the most recently undone state.
    pub fn redo(&mut self, doc: &mut Document) -> Option<String> {
        let target = self.future.iter().rposition(|e| !doc.matches(&e.snapshot))?;
        self.future.truncate(target + 1);
        let entry = self.future.pop()?;

        doc.restore(entry.snapshot.clone());
        let label = entry.action.clone();
        log::debug!("history: redo {label:?} #{}", entry.seq);

        self.past.push_back(entry);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        Some(label)
    }

    /// True when a state older than the newest entry is on record. Adjacent
    /// entries differ, so `undo` then always has a target.
    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    /// Exact answer for `doc`: also true when the live state has drifted
    /// from the newest entry without being recorded.
    pub fn can_undo_from(&self, doc: &Document) -> bool {
        self.can_undo() || self.past.back().is_some_and(|top| !doc.matches(&top.snapshot))
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Past entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.past.iter()
    }

    /// Label of the action the next `undo` reverts.
    pub fn undo_label(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.past.back().map(|e| e.action.as_str())
    }

    /// Label of the action the next `redo` re-applies.
    pub fn redo_label(&self) -> Option<&str> {
        self.future.last().map(|e| e.action.as_str())
    }
}
