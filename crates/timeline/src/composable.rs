//! The closed set of nodes that can sit inside a composition.

use cl_common::RationalTime;
use serde::{Deserialize, Serialize};

use crate::composition::{Composition, Stack, Track};
use crate::error::TimelineResult;
use crate::id::NodeId;
use crate::item::{Clip, Gap, Item};
use crate::transition::Transition;

/// Discriminant of every node kind, including the roots that never appear
/// as composition children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Clip,
    Gap,
    Transition,
    Track,
    Stack,
    Timeline,
    SerializableCollection,
}

/// A child of a `Track` or `Stack`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Composable {
    Clip(Clip),
    Gap(Gap),
    Transition(Transition),
    Track(Track),
    Stack(Stack),
}

impl Composable {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Clip(_) => NodeKind::Clip,
            Self::Gap(_) => NodeKind::Gap,
            Self::Transition(_) => NodeKind::Transition,
            Self::Track(_) => NodeKind::Track,
            Self::Stack(_) => NodeKind::Stack,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::Clip(c) => c.base.id,
            Self::Gap(g) => g.base.id,
            Self::Transition(t) => t.id,
            Self::Track(t) => t.base.id,
            Self::Stack(s) => s.base.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Clip(c) => &c.base.name,
            Self::Gap(g) => &g.base.name,
            Self::Transition(t) => &t.name,
            Self::Track(t) => &t.base.name,
            Self::Stack(s) => &s.base.name,
        }
    }

    /// Whether the node takes up time in a track. Only transitions do not.
    pub fn visible(&self) -> bool {
        !matches!(self, Self::Transition(_))
    }

    pub fn duration(&self) -> TimelineResult<RationalTime> {
        match self {
            Self::Clip(c) => c.duration(),
            Self::Gap(g) => g.duration(),
            Self::Transition(t) => Ok(t.duration()),
            Self::Track(t) => t.duration(),
            Self::Stack(s) => s.duration(),
        }
    }

    pub fn is_item(&self) -> bool {
        self.as_item().is_some()
    }

    pub fn as_item(&self) -> Option<&dyn Item> {
        match self {
            Self::Clip(c) => Some(c),
            Self::Gap(g) => Some(g),
            Self::Track(t) => Some(t),
            Self::Stack(s) => Some(s),
            Self::Transition(_) => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut dyn Item> {
        match self {
            Self::Clip(c) => Some(c),
            Self::Gap(g) => Some(g),
            Self::Track(t) => Some(t),
            Self::Stack(s) => Some(s),
            Self::Transition(_) => None,
        }
    }

    pub fn as_composition(&self) -> Option<&dyn Composition> {
        match self {
            Self::Track(t) => Some(t),
            Self::Stack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_composition_mut(&mut self) -> Option<&mut dyn Composition> {
        match self {
            Self::Track(t) => Some(t),
            Self::Stack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_clip(&self) -> Option<&Clip> {
        match self {
            Self::Clip(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_gap(&self) -> Option<&Gap> {
        match self {
            Self::Gap(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&Transition> {
        match self {
            Self::Transition(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            Self::Track(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_track_mut(&mut self) -> Option<&mut Track> {
        match self {
            Self::Track(t) => Some(t),
            _ => None,
        }
    }

    /// Deep copy with fresh ids on this node and every descendant.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_ids();
        copy
    }

    pub(crate) fn refresh_ids(&mut self) {
        match self {
            Self::Clip(c) => c.base.refresh_id(),
            Self::Gap(g) => g.base.refresh_id(),
            Self::Transition(t) => t.refresh_id(),
            Self::Track(t) => {
                t.base.refresh_id();
                t.children.iter_mut().for_each(Self::refresh_ids);
            }
            Self::Stack(s) => {
                s.base.refresh_id();
                s.children.iter_mut().for_each(Self::refresh_ids);
            }
        }
    }
}

impl From<Clip> for Composable {
    fn from(clip: Clip) -> Self {
        Self::Clip(clip)
    }
}

impl From<Gap> for Composable {
    fn from(gap: Gap) -> Self {
        Self::Gap(gap)
    }
}

impl From<Transition> for Composable {
    fn from(transition: Transition) -> Self {
        Self::Transition(transition)
    }
}

impl From<Track> for Composable {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

impl From<Stack> for Composable {
    fn from(stack: Stack) -> Self {
        Self::Stack(stack)
    }
}
