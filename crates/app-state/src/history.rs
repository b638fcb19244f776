//! Snapshot-based undo/redo history.
//!
//! A single bounded list of snapshots with a cursor on the live state:
//! - `push` drops everything after the cursor (the redo branch) and appends
//! - `undo`/`redo` move the cursor and hand back the snapshot to restore
//! - Batch grouping collapses a gesture (a drag) into one entry
//! - The oldest entries are evicted once `max_entries` is exceeded
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryStack::new(50)?;
//! history.push("Initial state", HistorySnapshot::empty())?;
//!
//! // After each edit, record the resulting state
//! history.push("Add element", snapshot_after_edit)?;
//!
//! // Undo hands back the state before the edit
//! if let Some(prev) = history.undo() {
//!     restore(prev.clone());
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use rb_common::{EditorError, EditorResult};

use crate::snapshot::HistorySnapshot;

/// A single entry in the history.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Human-readable label of the action that produced this state.
    pub label: String,
    pub snapshot: HistorySnapshot,
    pub timestamp: Instant,
}

/// Bounded undo/redo history with a cursor.
///
/// Invariants: the cursor is `None` exactly when the history is empty, and
/// otherwise indexes an existing entry. Entries before the cursor are
/// undoable, entries after it are redoable.
#[derive(Debug)]
pub struct HistoryStack {
    entries: VecDeque<HistoryEntry>,
    cursor: Option<usize>,
    max_entries: usize,
    /// When Some, a batch is open and pushes only update `batch_pending`.
    batch_label: Option<String>,
    batch_pending: Option<HistorySnapshot>,
}

impl HistoryStack {
    /// Create an empty history holding at most `max_entries` snapshots.
    pub fn new(max_entries: usize) -> EditorResult<Self> {
        if max_entries == 0 {
            return Err(EditorError::Config("max history size must be > 0".into()));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(max_entries.min(64)),
            cursor: None,
            max_entries,
            batch_label: None,
            batch_pending: None,
        })
    }

    /// Record a new state after an edit.
    ///
    /// Truncates the redo branch, appends, and evicts from the front while
    /// over capacity. Inside a batch the snapshot is held until
    /// [`end_batch`](Self::end_batch).
    pub fn push(&mut self, label: &str, snapshot: HistorySnapshot) -> EditorResult<()> {
        snapshot.validate()?;

        if self.batch_label.is_some() {
            tracing::trace!(label, "Push deferred: batch in progress");
            self.batch_pending = Some(snapshot);
            return Ok(());
        }

        self.push_entry(label.to_string(), snapshot);
        Ok(())
    }

    fn push_entry(&mut self, label: String, snapshot: HistorySnapshot) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        self.entries.push_back(HistoryEntry {
            label,
            snapshot,
            timestamp: Instant::now(),
        });

        let mut evicted = 0usize;
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
            evicted += 1;
        }
        self.cursor = Some(self.entries.len() - 1);

        tracing::debug!(
            label = %self.entries[self.entries.len() - 1].label,
            depth = self.entries.len(),
            evicted,
            bytes = self.estimated_size(),
            "History entry pushed"
        );
    }

    /// Step back one entry. Returns the snapshot to restore, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        self.abandon_stuck_batch();

        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        tracing::debug!(
            label = %self.entries[cursor + 1].label,
            cursor,
            "Undo"
        );
        Some(&self.entries[cursor].snapshot)
    }

    /// Step forward one entry. Returns the snapshot to restore, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        self.abandon_stuck_batch();

        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(cursor);
        tracing::debug!(label = %self.entries[cursor].label, cursor, "Redo");
        Some(&self.entries[cursor].snapshot)
    }

    /// A batch left open by a lost pointer-up is closed before undo/redo.
    fn abandon_stuck_batch(&mut self) {
        if self.batch_label.is_some() {
            tracing::warn!(label = ?self.batch_label, "Ending stuck batch before undo/redo");
            self.end_batch();
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 < self.entries.len(),
            None => false,
        }
    }

    /// Snapshot at the cursor (the live state).
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.cursor.map(|c| &self.entries[c].snapshot)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    pub fn redo_count(&self) -> usize {
        match self.cursor {
            Some(c) => self.entries.len() - c - 1,
            None => 0,
        }
    }

    /// Label of the action the next undo reverts.
    pub fn undo_label(&self) -> Option<&str> {
        match self.cursor {
            Some(c) if c > 0 => Some(&self.entries[c].label),
            _ => None,
        }
    }

    /// Label of the action the next redo reapplies.
    pub fn redo_label(&self) -> Option<&str> {
        let next = self.cursor? + 1;
        self.entries.get(next).map(|e| e.label.as_str())
    }

    /// Open a batch: subsequent pushes collapse into one entry.
    pub fn begin_batch(&mut self, label: &str) {
        if self.batch_label.is_some() {
            tracing::warn!(label, "Batch already open, ignoring begin");
            return;
        }
        self.batch_label = Some(label.to_string());
        self.batch_pending = None;
        tracing::debug!(label, "Batch started");
    }

    /// Close the open batch, pushing its last snapshot (if any) as one entry.
    /// Returns whether an entry was pushed.
    pub fn end_batch(&mut self) -> bool {
        let Some(label) = self.batch_label.take() else {
            return false;
        };
        match self.batch_pending.take() {
            Some(snapshot) => {
                self.push_entry(label, snapshot);
                true
            }
            None => {
                tracing::debug!(%label, "Batch ended with no changes");
                false
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch_label.is_some()
    }

    /// Drop all entries and any open batch.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.batch_label = None;
        self.batch_pending = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the capacity. Redo entries go first, then the oldest ones, so
    /// the live state is always kept.
    pub fn set_max_entries(&mut self, max_entries: usize) -> EditorResult<()> {
        if max_entries == 0 {
            return Err(EditorError::Config("max history size must be > 0".into()));
        }
        self.max_entries = max_entries;
        if let Some(cursor) = self.cursor {
            if self.entries.len() > max_entries {
                self.entries.truncate((cursor + 1).max(max_entries));
                let evicted = self.entries.len().saturating_sub(max_entries);
                self.entries.drain(..evicted);
                self.cursor = Some(cursor - evicted);
            }
        }
        tracing::debug!(max_entries, depth = self.entries.len(), "History capacity set");
        Ok(())
    }

    /// Rough memory footprint of all held snapshots, in bytes.
    pub fn estimated_size(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.snapshot.estimated_size() + e.label.len())
            .sum()
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.entries.iter().map(|e| &e.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_common::{EditorElement, ElementKind, TextProperties, TimeFrame, TimeMs};

    fn snap(n: u64) -> HistorySnapshot {
        let elements = (0..n)
            .map(|i| {
                EditorElement::new(
                    format!("el-{i}"),
                    "Text",
                    TimeFrame::from_millis(0, 1000).unwrap(),
                    ElementKind::Text(TextProperties::default()),
                )
            })
            .collect();
        HistorySnapshot::new(elements, None, TimeMs(n)).unwrap()
    }

    fn history_with(n: u64, max: usize) -> HistoryStack {
        let mut h = HistoryStack::new(max).unwrap();
        for i in 0..n {
            h.push(&format!("step {i}"), snap(i)).unwrap();
        }
        h
    }

    #[test]
    fn empty_history() {
        let mut h = HistoryStack::new(10).unwrap();
        assert!(h.is_empty());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(h.current().is_none());
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(HistoryStack::new(0).is_err());
    }

    #[test]
    fn single_entry_cannot_undo() {
        let mut h = history_with(1, 10);
        assert!(!h.can_undo());
        assert!(h.undo().is_none());
        assert_eq!(h.cursor(), Some(0));
    }

    #[test]
    fn undo_then_redo() {
        let mut h = history_with(3, 10);
        assert_eq!(h.undo().map(HistorySnapshot::time), Some(TimeMs(1)));
        assert_eq!(h.undo().map(HistorySnapshot::time), Some(TimeMs(0)));
        assert!(h.undo().is_none());
        assert_eq!(h.redo().map(HistorySnapshot::time), Some(TimeMs(1)));
        assert_eq!(h.redo().map(HistorySnapshot::time), Some(TimeMs(2)));
        assert!(h.redo().is_none());
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut h = history_with(4, 10);
        h.undo();
        h.undo();
        assert!(h.can_redo());
        h.push("branch", snap(9)).unwrap();
        assert!(!h.can_redo());
        assert_eq!(h.len(), 3);
        assert_eq!(h.current().map(HistorySnapshot::time), Some(TimeMs(9)));
    }

    #[test]
    fn eviction_keeps_newest() {
        let h = history_with(5, 3);
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(2));
        let times: Vec<_> = h.snapshots().map(HistorySnapshot::time).collect();
        assert_eq!(times, vec![TimeMs(2), TimeMs(3), TimeMs(4)]);
    }

    #[test]
    fn invalid_snapshot_rejected_and_history_unchanged() {
        let mut h = history_with(2, 10);
        let mut bad = EditorElement::new(
            "x",
            "Bad",
            TimeFrame::from_millis(0, 10).unwrap(),
            ElementKind::Text(TextProperties::default()),
        );
        bad.time_frame.start = TimeMs(50);
        let snapshot = HistorySnapshot::from_parts(vec![bad], None, TimeMs::ZERO);
        assert!(h.push("bad", snapshot).is_err());
        assert_eq!(h.len(), 2);
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn counts_and_labels() {
        let mut h = history_with(3, 10);
        assert_eq!(h.undo_count(), 2);
        assert_eq!(h.redo_count(), 0);
        assert_eq!(h.undo_label(), Some("step 2"));
        assert_eq!(h.redo_label(), None);
        h.undo();
        assert_eq!(h.undo_label(), Some("step 1"));
        assert_eq!(h.redo_label(), Some("step 2"));
        assert_eq!(h.redo_count(), 1);
    }

    #[test]
    fn batch_collapses_pushes() {
        let mut h = history_with(1, 10);
        h.begin_batch("Drag");
        assert!(h.is_batching());
        for i in 1..=5 {
            h.push("move", snap(i)).unwrap();
        }
        assert_eq!(h.len(), 1);
        assert!(h.end_batch());
        assert_eq!(h.len(), 2);
        assert_eq!(h.undo_label(), Some("Drag"));
        assert_eq!(h.current().map(HistorySnapshot::time), Some(TimeMs(5)));
    }

    #[test]
    fn empty_batch_pushes_nothing() {
        let mut h = history_with(1, 10);
        h.begin_batch("Drag");
        assert!(!h.end_batch());
        assert_eq!(h.len(), 1);
        assert!(!h.end_batch());
    }

    #[test]
    fn undo_closes_stuck_batch() {
        let mut h = history_with(1, 10);
        h.begin_batch("Drag");
        h.push("move", snap(3)).unwrap();
        let restored = h.undo().map(HistorySnapshot::time);
        assert_eq!(restored, Some(TimeMs(0)));
        assert!(!h.is_batching());
        assert!(h.can_redo());
    }

    #[test]
    fn shrinking_capacity_drops_redo_then_oldest() {
        let mut h = history_with(6, 10);
        h.undo();
        h.set_max_entries(3).unwrap();
        assert_eq!(h.len(), 3);
        assert!(!h.can_redo());
        assert_eq!(h.current().map(HistorySnapshot::time), Some(TimeMs(4)));
        assert!(h.set_max_entries(0).is_err());
    }

    #[test]
    fn shrinking_capacity_keeps_redo_when_room() {
        let mut h = history_with(4, 10);
        h.undo();
        h.set_max_entries(4).unwrap();
        assert_eq!(h.len(), 4);
        assert!(h.can_redo());
    }

    #[test]
    fn shrinking_capacity_keeps_cursor_on_same_entry() {
        let mut h = history_with(6, 10);
        for _ in 0..4 {
            h.undo();
        }
        h.set_max_entries(3).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(1));
        assert_eq!(h.current().map(HistorySnapshot::time), Some(TimeMs(1)));
        assert!(h.can_redo());
    }

    #[test]
    fn estimated_size_tracks_held_snapshots() {
        let mut h = history_with(1, 2);
        let one = h.estimated_size();
        h.push("grow", snap(4)).unwrap();
        let two = h.estimated_size();
        assert!(two > one);
        // Eviction at capacity releases the oldest snapshot.
        h.push("grow", snap(4)).unwrap();
        assert!(h.estimated_size() > two);
        h.clear();
        assert_eq!(h.estimated_size(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut h = history_with(3, 10);
        h.begin_batch("Drag");
        h.clear();
        assert!(h.is_empty());
        assert!(!h.is_batching());
        assert_eq!(h.cursor(), None);
    }
}
