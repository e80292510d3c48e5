//! An edit session: a timeline plus the history of edits applied to it.

use cl_common::EditConfig;
use cl_edit::EditResult;
use cl_timeline::Timeline;

use crate::history::HistoryManager;
use crate::snapshot::TimelineSnapshot;

/// Owns a timeline and applies edits to it transactionally.
///
/// Each [`apply`](Self::apply) either succeeds and becomes one undo step, or
/// fails and leaves the timeline exactly as it was. The session takes
/// `&mut self` for every change and holds no locks; share it behind whatever
/// synchronization the host already uses.
#[derive(Debug)]
pub struct EditSession {
    timeline: Timeline,
    history: HistoryManager,
    config: EditConfig,
}

impl EditSession {
    pub fn new(timeline: Timeline, config: &EditConfig) -> Self {
        Self {
            timeline,
            history: HistoryManager::new(config.max_history),
            config: config.clone(),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    /// Run `edit` against the timeline as one undoable step named `label`.
    ///
    /// On error the timeline is restored from a snapshot taken before the
    /// edit ran, and the error is returned.
    pub fn apply<T, F>(&mut self, label: &str, edit: F) -> EditResult<T>
    where
        F: FnOnce(&mut Timeline) -> EditResult<T>,
    {
        let before = TimelineSnapshot::capture(&self.timeline);
        match edit(&mut self.timeline) {
            Ok(value) => {
                self.history.push(label, before);
                tracing::debug!(label, "Edit applied");
                Ok(value)
            }
            Err(err) => {
                self.timeline = before.into_timeline();
                tracing::warn!(label, error = %err, "Edit failed, timeline rolled back");
                Err(err)
            }
        }
    }

    /// Revert the last edit. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        let current = TimelineSnapshot::capture(&self.timeline);
        match self.history.undo(current) {
            Some(previous) => {
                self.timeline = previous.into_timeline();
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone edit. Returns whether anything was redone.
    pub fn redo(&mut self) -> bool {
        let current = TimelineSnapshot::capture(&self.timeline);
        match self.history.redo(current) {
            Some(next) => {
                self.timeline = next.into_timeline();
                true
            }
            None => false,
        }
    }

    /// Group the following applies into one undo step named `label`.
    pub fn begin_batch(&mut self, label: &str) {
        self.history
            .start_batch(label, TimelineSnapshot::capture(&self.timeline));
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }
}
