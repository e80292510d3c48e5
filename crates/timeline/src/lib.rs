//! `cl-timeline` — Composition tree model for the Cutline edit engine.
//!
//! The tree is owned by value: compositions hold their children in a `Vec`
//! and edit operations address children by index or by [`NodeId`]. It covers:
//!
//! - **Items**: `Clip`, `Gap`, and the compositions `Track` and `Stack`
//! - **Transitions**: zero-length overlaps between adjacent items
//! - **Roots**: `Timeline` and `SerializableCollection`, wrapped in `Node`
//!
//! # Usage
//!
//! ```rust
//! use cl_common::{RationalTime, TimeRange};
//! use cl_timeline::{Clip, Composition, Gap, Item, Track, TrackKind};
//!
//! let rt = |v| RationalTime::new(v, 24.0);
//! let track = Track::new("V1", TrackKind::Video).with_children([
//!     Clip::new("A", Some(TimeRange::new(rt(0.0), rt(24.0)))).into(),
//!     Gap::with_duration(rt(12.0)).into(),
//! ]);
//! assert_eq!(track.duration().unwrap(), rt(36.0));
//! assert_eq!(track.range_of_child_at_index(1).unwrap().start_time(), rt(24.0));
//! ```

pub mod composable;
pub mod composition;
pub mod effect;
pub mod error;
pub mod id;
pub mod item;
pub mod timeline;
pub mod transition;

pub use composable::{Composable, NodeKind};
pub use composition::{Composition, Stack, Track, TrackKind};
pub use effect::Effect;
pub use error::{TimelineError, TimelineResult};
pub use id::NodeId;
pub use item::{Clip, Gap, Item, ItemBase, MediaReference};
pub use timeline::{Node, SerializableCollection, Timeline};
pub use transition::{Transition, TransitionType};
