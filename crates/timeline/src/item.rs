//! Items: composables that occupy time on a track.
//!
//! An item exposes a window (`source_range`) onto the media it can reach
//! (`available_range`). When no source range is set the whole available range
//! is used. `Clip`, `Gap`, `Track` and `Stack` are items; `Transition` is not.

use cl_common::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::{TimelineError, TimelineResult};
use crate::id::NodeId;

fn default_enabled() -> bool {
    true
}

/// State shared by every item kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemBase {
    #[serde(skip)]
    pub(crate) id: NodeId,
    pub name: String,
    pub source_range: Option<TimeRange>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ItemBase {
    pub fn new(name: impl Into<String>, source_range: Option<TimeRange>) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            source_range,
            effects: Vec::new(),
            enabled: true,
        }
    }

    pub(crate) fn refresh_id(&mut self) {
        self.id = NodeId::next();
    }
}

/// Capability interface the edit algorithms consume.
pub trait Item {
    fn base(&self) -> &ItemBase;
    fn base_mut(&mut self) -> &mut ItemBase;

    /// The largest window the underlying media can expose.
    fn available_range(&self) -> TimelineResult<TimeRange>;

    fn id(&self) -> NodeId {
        self.base().id
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn source_range(&self) -> Option<TimeRange> {
        self.base().source_range
    }

    fn set_source_range(&mut self, source_range: Option<TimeRange>) {
        self.base_mut().source_range = source_range;
    }

    /// The range used for edit math: source range, else available range.
    fn trimmed_range(&self) -> TimelineResult<TimeRange> {
        match self.source_range() {
            Some(range) => Ok(range),
            None => self.available_range(),
        }
    }

    fn duration(&self) -> TimelineResult<RationalTime> {
        Ok(self.trimmed_range()?.duration())
    }

    fn effects(&self) -> &[Effect] {
        &self.base().effects
    }

    fn set_effects(&mut self, effects: Vec<Effect>) {
        self.base_mut().effects = effects;
    }

    fn enabled(&self) -> bool {
        self.base().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }
}

/// Pointer to external media. Resolution (linking) happens outside the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    pub name: String,
    pub target_url: Option<String>,
    pub available_range: Option<TimeRange>,
}

impl MediaReference {
    pub fn new(target_url: impl Into<String>, available_range: Option<TimeRange>) -> Self {
        Self {
            name: String::new(),
            target_url: Some(target_url.into()),
            available_range,
        }
    }
}

/// A piece of media placed on a track.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Clip {
    #[serde(flatten)]
    pub base: ItemBase,
    pub media_reference: Option<MediaReference>,
}

impl Clip {
    pub fn new(name: impl Into<String>, source_range: Option<TimeRange>) -> Self {
        Self {
            base: ItemBase::new(name, source_range),
            media_reference: None,
        }
    }

    pub fn with_media_reference(mut self, media_reference: MediaReference) -> Self {
        self.media_reference = Some(media_reference);
        self
    }

    /// Copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.base.refresh_id();
        copy
    }

    /// Attach an anonymous media reference exposing `available_range`.
    pub fn with_available_range(self, available_range: TimeRange) -> Self {
        self.with_media_reference(MediaReference {
            available_range: Some(available_range),
            ..MediaReference::default()
        })
    }
}

impl Item for Clip {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn available_range(&self) -> TimelineResult<TimeRange> {
        let reference = self
            .media_reference
            .as_ref()
            .ok_or_else(|| TimelineError::MissingReference {
                name: self.base.name.clone(),
            })?;
        reference
            .available_range
            .ok_or_else(|| TimelineError::CannotComputeAvailableRange {
                name: self.base.name.clone(),
            })
    }
}

/// Empty time on a track.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gap {
    #[serde(flatten)]
    pub base: ItemBase,
}

impl Gap {
    pub fn new(name: impl Into<String>, source_range: Option<TimeRange>) -> Self {
        Self {
            base: ItemBase::new(name, source_range),
        }
    }

    /// An unnamed gap lasting `duration`.
    pub fn with_duration(duration: RationalTime) -> Self {
        let range = TimeRange::new(RationalTime::zero(duration.rate()), duration);
        Self::new("", Some(range))
    }

    /// Copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.base.refresh_id();
        copy
    }
}

impl Item for Gap {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    /// A gap has no media; its extent is whatever it was given.
    fn available_range(&self) -> TimelineResult<TimeRange> {
        self.base
            .source_range
            .ok_or_else(|| TimelineError::CannotComputeAvailableRange {
                name: self.base.name.clone(),
            })
    }
}
