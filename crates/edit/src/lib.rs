//! `cl-edit` — Timeline edit algebra for the Cutline edit engine.
//!
//! Operations work on anything implementing [`Composition`](cl_timeline::Composition),
//! address items by [`NodeId`](cl_timeline::NodeId) or by composition time,
//! and fail with an [`EditError`] instead of leaving a half-applied edit:
//!
//! - **Adjust**: `trim`, `roll`, `slide` move edit points between neighbors;
//!   `slip` and `ripple` change a single item's source window
//! - **Structural**: `insert`, `overwrite`, `remove`, `remove_range`, `slice`
//!   and `fill` change which children a composition holds
//! - **Rewrite**: `flatten_tracks`, `track_trimmed_to_range`,
//!   `track_with_expanded_transitions`, `filtered_composition` and friends build
//!   new trees from existing ones
//! - **Query**: `item_at_time`, `items_in_range`, `split_item_at_time`
//!
//! Mutating operations assume a single writer. Rewrites only read their input.
//!
//! # Usage
//!
//! ```rust
//! use cl_common::{RationalTime, TimeRange};
//! use cl_edit::{insert, trim, InsertOptions, TrimOptions};
//! use cl_timeline::{Clip, Composable, Item, Track, TrackKind};
//!
//! let rt = |v| RationalTime::new(v, 24.0);
//! let clip = |name: &str, d| -> Composable {
//!     Clip::new(name, Some(TimeRange::new(rt(0.0), rt(d)))).into()
//! };
//!
//! let mut track = Track::new("V1", TrackKind::Video).with_children([clip("A", 24.0), clip("B", 48.0)]);
//! let b = track.children[1].id();
//! trim(&mut track, b, rt(12.0), rt(0.0), &TrimOptions::default()).unwrap();
//! assert_eq!(track.children[0].duration().unwrap(), rt(36.0));
//!
//! insert(&mut track, &clip("X", 10.0), rt(36.0), &InsertOptions::default()).unwrap();
//! assert_eq!(track.duration().unwrap(), rt(82.0));
//! ```

pub mod adjust;
pub mod error;
pub mod options;
pub mod query;
pub mod range;
pub mod rewrite;
pub mod structural;

pub use adjust::{ripple, roll, slide, slip, trim};
pub use error::{EditError, EditResult};
pub use options::{
    InsertOptions, OverwriteOptions, ReferencePoint, RemoveOptions, SliceOptions, TrimOptions,
};
pub use query::{
    clamp_to_available_range, composition_duration, item_at_time, items_in_range,
    split_item_at_time, transitions_in_range, ItemSlot,
};
pub use range::{intersect_ranges, subtract_range};
pub use rewrite::{
    filtered_composition, filtered_with_sequence_context, flatten_stack,
    flatten_timeline_video_tracks, flatten_tracks, keep_filter, name_filter, prune_filter,
    timeline_audio_tracks, timeline_trimmed_to_range, timeline_video_tracks, top_clip_at_time,
    track_trimmed_to_range, track_with_expanded_transitions, type_filter,
};
pub use structural::{fill, insert, overwrite, remove, remove_range, slice};
