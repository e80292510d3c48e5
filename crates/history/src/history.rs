//! Snapshot-based undo/redo history.
//!
//! - Undo/redo stacks of `TimelineSnapshot`
//! - Batch grouping to collapse several edits into one undo step
//! - Configurable maximum history depth
//!
//! Undo and redo swap: the caller hands in a snapshot of the current state and
//! gets back the one to restore, so the same entry can travel back and forth.
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(50);
//!
//! // Before an edit, capture the current state
//! history.push("Trim clip", TimelineSnapshot::capture(&timeline));
//!
//! // Undo
//! if let Some(prev) = history.undo(TimelineSnapshot::capture(&timeline)) {
//!     timeline = prev.into_timeline();
//! }
//! ```

use std::time::Instant;

use crate::snapshot::TimelineSnapshot;

/// A single entry in the undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Label of the edit (e.g. "Trim clip", "Insert").
    pub label: String,
    pub snapshot: TimelineSnapshot,
    pub timestamp: Instant,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: TimelineSnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// Undo/redo stacks of timeline snapshots.
///
/// Pushing a new entry clears the redo stack. While a batch is open, pushes
/// are suppressed and the batch becomes a single entry when it ends.
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
    /// Label of the open batch, if any.
    batch_label: Option<String>,
    /// State captured when the batch opened.
    batch_start_snapshot: Option<TimelineSnapshot>,
}

impl HistoryManager {
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
            batch_label: None,
            batch_start_snapshot: None,
        }
    }

    /// Record `snapshot`, the state *before* the edit named `label`.
    pub fn push(&mut self, label: &str, snapshot: TimelineSnapshot) {
        if self.batch_label.is_some() {
            tracing::debug!(label, "Push suppressed: batch in progress");
            return;
        }

        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry::new(label, snapshot));
        self.enforce_max();

        tracing::debug!(
            label,
            undo_depth = self.undo_stack.len(),
            "History entry pushed"
        );
    }

    /// Step back. `current` is kept for redo; returns the state to restore, or
    /// `None` (dropping `current`) when there is nothing to undo.
    pub fn undo(&mut self, current: TimelineSnapshot) -> Option<TimelineSnapshot> {
        self.abandon_batch("undo");

        let entry = self.undo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        self.redo_stack.push(HistoryEntry::new(entry.label, current));
        Some(entry.snapshot)
    }

    /// Step forward again. `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: TimelineSnapshot) -> Option<TimelineSnapshot> {
        self.abandon_batch("redo");

        let entry = self.redo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        self.undo_stack.push(HistoryEntry::new(entry.label, current));
        self.enforce_max();
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Open a batch. `before` is the state the whole batch undoes to.
    pub fn start_batch(&mut self, label: &str, before: TimelineSnapshot) {
        if self.batch_label.is_some() {
            tracing::warn!(label, "start_batch called while already batching, ignoring");
            return;
        }

        self.batch_label = Some(label.to_string());
        self.batch_start_snapshot = Some(before);
        tracing::debug!(label, "Batch started");
    }

    /// Close the open batch as one undo entry. No-op outside a batch.
    pub fn end_batch(&mut self) {
        let (Some(label), Some(before)) = (self.batch_label.take(), self.batch_start_snapshot.take())
        else {
            return;
        };

        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry::new(label, before));
        self.enforce_max();

        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            "Batch ended, entry pushed"
        );
    }

    pub fn is_batching(&self) -> bool {
        self.batch_label.is_some()
    }

    /// Label of the edit the next undo reverts.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.label.as_str())
    }

    /// Label of the edit the next redo reapplies.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    /// Undo labels, oldest first.
    pub fn undo_labels(&self) -> Vec<&str> {
        self.undo_stack.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks and any open batch.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch_label = None;
        self.batch_start_snapshot = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the depth limit, dropping the oldest entries if needed.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max;
        self.enforce_max();
    }

    fn enforce_max(&mut self) {
        let excess = self.undo_stack.len().saturating_sub(self.max_entries);
        if excess > 0 {
            self.undo_stack.drain(..excess);
        }
    }

    /// A batch left open across undo/redo is discarded.
    fn abandon_batch(&mut self, during: &str) {
        if self.batch_label.take().is_some() {
            tracing::warn!(during, "Ending stuck batch");
            self.batch_start_snapshot = None;
        }
    }
}
