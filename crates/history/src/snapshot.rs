//! Timeline snapshots for undo/redo.
//!
//! A snapshot is a plain clone of the timeline. Cloning keeps every
//! [`NodeId`](cl_timeline::NodeId), so ids a caller holds stay valid across
//! undo and redo.

use cl_common::RationalTime;
use cl_timeline::{Timeline, TimelineResult};
use serde::{Deserialize, Serialize};

/// The full state of a timeline at one point in history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    timeline: Timeline,
}

impl TimelineSnapshot {
    /// Capture a snapshot of `timeline`.
    pub fn capture(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }

    /// Overwrite `timeline` with this snapshot.
    pub fn restore(&self, timeline: &mut Timeline) {
        timeline.clone_from(&self.timeline);
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    pub fn duration(&self) -> TimelineResult<RationalTime> {
        self.timeline.duration()
    }
}
