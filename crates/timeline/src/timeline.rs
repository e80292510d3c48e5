//! Roots of a composition tree: `Timeline` and `SerializableCollection`.

use cl_common::RationalTime;
use serde::{Deserialize, Serialize};

use crate::composable::{Composable, NodeKind};
use crate::composition::{Stack, Track, TrackKind};
use crate::error::TimelineResult;
use crate::id::NodeId;
use crate::item::Item;

/// A named edit: a stack of tracks plus an optional global start time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timeline {
    pub name: String,
    #[serde(default)]
    pub global_start_time: Option<RationalTime>,
    pub tracks: Stack,
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            tracks: Stack::new("tracks"),
            name,
            global_start_time: None,
        }
    }

    pub fn with_tracks(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.tracks.children = tracks.into_iter().map(Composable::from).collect();
        self
    }

    pub fn id(&self) -> NodeId {
        self.tracks.id()
    }

    pub fn duration(&self) -> TimelineResult<RationalTime> {
        self.tracks.duration()
    }

    /// Direct child tracks of the given kind, in stacking order.
    pub fn tracks_of_kind(&self, kind: TrackKind) -> impl Iterator<Item = &Track> {
        self.tracks
            .children
            .iter()
            .filter_map(Composable::as_track)
            .filter(move |t| t.kind == kind)
    }

    pub fn video_tracks(&self) -> Vec<&Track> {
        self.tracks_of_kind(TrackKind::Video).collect()
    }

    pub fn audio_tracks(&self) -> Vec<&Track> {
        self.tracks_of_kind(TrackKind::Audio).collect()
    }

    /// The track at `index` in the stack, if that child is a track.
    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.children.get_mut(index)?.as_track_mut()
    }

    /// Deep copy with fresh ids throughout.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.tracks.base.refresh_id();
        copy.tracks
            .children
            .iter_mut()
            .for_each(Composable::refresh_ids);
        copy
    }
}

/// An unordered bag of roots, used for grouping edits.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SerializableCollection {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl SerializableCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

/// Any node a tree rewrite can start from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "root")]
pub enum Node {
    Composable(Composable),
    Timeline(Timeline),
    Collection(SerializableCollection),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Composable(c) => c.kind(),
            Self::Timeline(_) => NodeKind::Timeline,
            Self::Collection(_) => NodeKind::SerializableCollection,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Composable(c) => c.name(),
            Self::Timeline(t) => &t.name,
            Self::Collection(c) => &c.name,
        }
    }

    pub fn as_composable(&self) -> Option<&Composable> {
        match self {
            Self::Composable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_timeline(&self) -> Option<&Timeline> {
        match self {
            Self::Timeline(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&SerializableCollection> {
        match self {
            Self::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_composable(self) -> Option<Composable> {
        match self {
            Self::Composable(c) => Some(c),
            _ => None,
        }
    }

    pub fn duplicate(&self) -> Self {
        match self {
            Self::Composable(c) => Self::Composable(c.duplicate()),
            Self::Timeline(t) => Self::Timeline(t.duplicate()),
            Self::Collection(c) => Self::Collection(SerializableCollection {
                name: c.name.clone(),
                children: c.children.iter().map(Node::duplicate).collect(),
            }),
        }
    }
}

impl From<Composable> for Node {
    fn from(composable: Composable) -> Self {
        Self::Composable(composable)
    }
}

impl From<Timeline> for Node {
    fn from(timeline: Timeline) -> Self {
        Self::Timeline(timeline)
    }
}

impl From<SerializableCollection> for Node {
    fn from(collection: SerializableCollection) -> Self {
        Self::Collection(collection)
    }
}
