//! `cl-history` — Undoable edit sessions for the Cutline edit engine.
//!
//! - **Snapshots**: `TimelineSnapshot` captures a whole timeline, ids included
//! - **History**: `HistoryManager` keeps bounded undo/redo stacks with batching
//! - **Session**: `EditSession` runs edits transactionally and records them
//!
//! # Usage
//!
//! ```rust
//! use cl_common::{EditConfig, RationalTime, TimeRange};
//! use cl_edit::{slice, SliceOptions};
//! use cl_history::EditSession;
//! use cl_timeline::{Clip, Timeline, Track, TrackKind};
//!
//! let rt = |v| RationalTime::new(v, 24.0);
//! let timeline = Timeline::new("edit").with_tracks([Track::new("V1", TrackKind::Video)
//!     .with_children([Clip::new("A", Some(TimeRange::new(rt(0.0), rt(48.0)))).into()])]);
//!
//! let mut session = EditSession::new(timeline, &EditConfig::default());
//! session
//!     .apply("Slice", |t| match t.track_mut(0) {
//!         Some(track) => slice(track, rt(24.0), &SliceOptions::default()),
//!         None => Ok(()),
//!     })
//!     .unwrap();
//! assert_eq!(session.timeline().video_tracks()[0].children.len(), 2);
//!
//! assert!(session.undo());
//! assert_eq!(session.timeline().video_tracks()[0].children.len(), 1);
//! ```

pub mod history;
pub mod session;
pub mod snapshot;

pub use history::{HistoryEntry, HistoryManager};
pub use session::EditSession;
pub use snapshot::TimelineSnapshot;
