//! Options for the structural edits and trim.
//!
//! Each options struct starts from `Default` (transitions removed, removed
//! space filled, plain filler gaps) or from an [`EditConfig`].

use std::fmt;

use cl_common::EditConfig;
use cl_timeline::Gap;

/// How `fill` reconciles an item's duration with the gap it replaces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReferencePoint {
    /// Keep the item's own duration; overwrite from the gap's start.
    #[default]
    Source,
    /// Trim or pad the item to exactly the gap's duration.
    Sequence,
    /// Keep the whole item and retime it with a linear time warp.
    Fit,
}

impl fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Source => "Source",
            Self::Sequence => "Sequence",
            Self::Fit => "Fit",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct InsertOptions {
    /// Remove a transition sitting at the insert point.
    pub remove_transitions: bool,
    /// Template for filler gaps; a plain gap when `None`.
    pub fill_template: Option<Gap>,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            remove_transitions: true,
            fill_template: None,
        }
    }
}

impl InsertOptions {
    pub fn from_config(config: &EditConfig) -> Self {
        Self {
            remove_transitions: config.remove_transitions,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct OverwriteOptions {
    /// Remove transitions intersecting the overwritten range.
    pub remove_transitions: bool,
    pub fill_template: Option<Gap>,
}

impl Default for OverwriteOptions {
    fn default() -> Self {
        Self {
            remove_transitions: true,
            fill_template: None,
        }
    }
}

impl OverwriteOptions {
    pub fn from_config(config: &EditConfig) -> Self {
        Self {
            remove_transitions: config.remove_transitions,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct RemoveOptions {
    /// Replace the removed span with a gap instead of closing it up.
    pub fill: bool,
    pub fill_template: Option<Gap>,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            fill: true,
            fill_template: None,
        }
    }
}

impl RemoveOptions {
    pub fn from_config(config: &EditConfig) -> Self {
        Self {
            fill: config.fill_removed,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct SliceOptions {
    /// Remove a transition at the cut; when false the cut fails instead.
    pub remove_transitions: bool,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            remove_transitions: true,
        }
    }
}

impl SliceOptions {
    pub fn from_config(config: &EditConfig) -> Self {
        Self {
            remove_transitions: config.remove_transitions,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TrimOptions {
    pub fill_template: Option<Gap>,
}

impl TrimOptions {
    /// Trim has no configurable switches; the config is accepted for symmetry.
    pub fn from_config(_config: &EditConfig) -> Self {
        Self::default()
    }
}
