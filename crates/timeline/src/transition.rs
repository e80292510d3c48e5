//! Transitions between adjacent items on a track.

use cl_common::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Kind of transition. Rendering is outside the engine; only the name matters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionType {
    #[default]
    SmpteDissolve,
    Custom(String),
}

/// An overlap between the item before and the item after.
///
/// A transition occupies no time of its own on the track. `in_offset` is how
/// far it reaches back into the previous item and `out_offset` how far into
/// the next one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transition {
    #[serde(skip)]
    pub(crate) id: NodeId,
    pub name: String,
    #[serde(default)]
    pub transition_type: TransitionType,
    pub in_offset: RationalTime,
    pub out_offset: RationalTime,
}

impl Transition {
    pub fn new(name: impl Into<String>, in_offset: RationalTime, out_offset: RationalTime) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            transition_type: TransitionType::default(),
            in_offset,
            out_offset,
        }
    }

    pub fn with_type(mut self, transition_type: TransitionType) -> Self {
        self.transition_type = transition_type;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_offset(&self) -> RationalTime {
        self.in_offset
    }

    pub fn out_offset(&self) -> RationalTime {
        self.out_offset
    }

    /// Total overlap: `in_offset + out_offset`.
    pub fn duration(&self) -> RationalTime {
        self.in_offset + self.out_offset
    }

    /// The span a transition covers when it sits at `position` on its track.
    pub fn range_at(&self, position: RationalTime) -> TimeRange {
        TimeRange::new(position - self.in_offset, self.duration())
    }

    pub(crate) fn refresh_id(&mut self) {
        self.id = NodeId::next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_sum_of_offsets() {
        let t = Transition::new("dissolve", RationalTime::new(6.0, 24.0), RationalTime::new(12.0, 24.0));
        assert_eq!(t.duration(), RationalTime::new(18.0, 24.0));
        assert_eq!(t.transition_type, TransitionType::SmpteDissolve);
    }

    #[test]
    fn range_at_reaches_back_by_in_offset() {
        let t = Transition::new("dissolve", RationalTime::new(6.0, 24.0), RationalTime::new(6.0, 24.0));
        let r = t.range_at(RationalTime::new(24.0, 24.0));
        assert_eq!(r.start_time(), RationalTime::new(18.0, 24.0));
        assert_eq!(r.end_time_exclusive(), RationalTime::new(30.0, 24.0));
    }
}
