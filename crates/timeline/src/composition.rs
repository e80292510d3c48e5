//! Compositions: ordered containers of composables.
//!
//! - `Track` places children one after another; transitions take no time.
//! - `Stack` overlaps its children, later children sit on top.

use cl_common::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::composable::Composable;
use crate::error::{TimelineError, TimelineResult};
use crate::id::NodeId;
use crate::item::{Item, ItemBase};

/// The child-list interface edit algorithms mutate through.
pub trait Composition {
    fn children(&self) -> &[Composable];
    fn children_mut(&mut self) -> &mut Vec<Composable>;

    /// The span child `index` occupies in this composition's time.
    fn range_of_child_at_index(&self, index: usize) -> TimelineResult<TimeRange>;

    /// Ranges of every child, `None` where the range cannot be computed.
    ///
    /// Callers that need every range should use this rather than calling
    /// `range_of_child_at_index` in a loop.
    fn child_ranges(&self) -> Vec<Option<TimeRange>> {
        (0..self.children().len())
            .map(|i| self.range_of_child_at_index(i).ok())
            .collect()
    }

    fn child(&self, index: usize) -> TimelineResult<&Composable> {
        let len = self.children().len();
        self.children()
            .get(index)
            .ok_or(TimelineError::IndexOutOfRange { index, len })
    }

    fn child_mut(&mut self, index: usize) -> TimelineResult<&mut Composable> {
        let len = self.children().len();
        self.children_mut()
            .get_mut(index)
            .ok_or(TimelineError::IndexOutOfRange { index, len })
    }

    fn index_of_child(&self, id: NodeId) -> TimelineResult<usize> {
        self.children()
            .iter()
            .position(|c| c.id() == id)
            .ok_or(TimelineError::NotAChild { id })
    }

    /// Insert at `index`; `index == len` appends.
    fn insert_child(&mut self, index: usize, child: Composable) -> TimelineResult<()> {
        let len = self.children().len();
        if index > len {
            return Err(TimelineError::IndexOutOfRange { index, len });
        }
        self.children_mut().insert(index, child);
        Ok(())
    }

    fn remove_child(&mut self, index: usize) -> TimelineResult<Composable> {
        let len = self.children().len();
        if index >= len {
            return Err(TimelineError::IndexOutOfRange { index, len });
        }
        Ok(self.children_mut().remove(index))
    }

    fn append_child(&mut self, child: Composable) {
        self.children_mut().push(child);
    }

    fn set_children(&mut self, children: Vec<Composable>) {
        *self.children_mut() = children;
    }
}

/// What a track carries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
}

/// Sequential composition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub kind: TrackKind,
    #[serde(default)]
    pub children: Vec<Composable>,
}

impl Track {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            base: ItemBase::new(name, None),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Composable>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Deep copy with fresh ids throughout.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.base.refresh_id();
        copy.children.iter_mut().for_each(Composable::refresh_ids);
        copy
    }

    /// Sum of visible child durations, `None` when there are no visible children.
    fn visible_duration(&self) -> TimelineResult<Option<RationalTime>> {
        let mut total: Option<RationalTime> = None;
        for child in self.children.iter().filter(|c| c.visible()) {
            let d = child.duration()?;
            total = Some(match total {
                Some(t) => t + d,
                None => d,
            });
        }
        Ok(total)
    }
}

impl Composition for Track {
    fn children(&self) -> &[Composable] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Composable> {
        &mut self.children
    }

    fn range_of_child_at_index(&self, index: usize) -> TimelineResult<TimeRange> {
        let child = self.child(index)?;
        let duration = child.duration()?;
        let mut start = RationalTime::zero(duration.rate());
        for earlier in self.children[..index].iter().filter(|c| c.visible()) {
            start = start + earlier.duration()?;
        }
        Ok(match child {
            Composable::Transition(t) => t.range_at(start),
            _ => TimeRange::new(start, duration),
        })
    }

    /// One pass over the children keeping a running sum of visible durations.
    fn child_ranges(&self) -> Vec<Option<TimeRange>> {
        let mut ranges = Vec::with_capacity(self.children.len());
        let mut elapsed = Some(RationalTime::ZERO);
        for child in &self.children {
            let range = match (elapsed, child.duration()) {
                (Some(sum), Ok(duration)) => {
                    let start = RationalTime::zero(duration.rate()) + sum;
                    Some(match child {
                        Composable::Transition(t) => t.range_at(start),
                        _ => TimeRange::new(start, duration),
                    })
                }
                _ => None,
            };
            if child.visible() {
                elapsed = range.map(|r| r.end_time_exclusive());
            }
            ranges.push(range);
        }
        ranges
    }
}

impl Item for Track {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn available_range(&self) -> TimelineResult<TimeRange> {
        Ok(match self.visible_duration()? {
            Some(total) => TimeRange::new(RationalTime::zero(total.rate()), total),
            None => TimeRange::new(RationalTime::ZERO, RationalTime::ZERO),
        })
    }
}

/// Layered composition; every child starts at zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stack {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub children: Vec<Composable>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ItemBase::new(name, None),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Composable>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Deep copy with fresh ids throughout.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.base.refresh_id();
        copy.children.iter_mut().for_each(Composable::refresh_ids);
        copy
    }
}

impl Composition for Stack {
    fn children(&self) -> &[Composable] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Composable> {
        &mut self.children
    }

    fn range_of_child_at_index(&self, index: usize) -> TimelineResult<TimeRange> {
        let duration = self.child(index)?.duration()?;
        Ok(TimeRange::new(RationalTime::zero(duration.rate()), duration))
    }
}

impl Item for Stack {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    /// `[0, longest child)`.
    fn available_range(&self) -> TimelineResult<TimeRange> {
        let mut longest: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            if longest.map_or(true, |l| d.to_seconds() > l.to_seconds()) {
                longest = Some(d);
            }
        }
        Ok(match longest {
            Some(d) => TimeRange::new(RationalTime::zero(d.rate()), d),
            None => TimeRange::new(RationalTime::ZERO, RationalTime::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Clip, Gap};
    use crate::transition::Transition;

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn clip(name: &str, duration: f64) -> Composable {
        Clip::new(name, Some(TimeRange::new(rt(0.0), rt(duration)))).into()
    }

    fn make_track() -> Track {
        Track::new("V1", TrackKind::Video).with_children([
            clip("A", 24.0),
            Transition::new("dissolve", rt(6.0), rt(6.0)).into(),
            clip("B", 48.0),
            Gap::with_duration(rt(12.0)).into(),
        ])
    }

    #[test]
    fn track_child_ranges_are_cumulative() {
        let track = make_track();
        assert_eq!(
            track.range_of_child_at_index(0).unwrap(),
            TimeRange::new(rt(0.0), rt(24.0))
        );
        assert_eq!(
            track.range_of_child_at_index(2).unwrap(),
            TimeRange::new(rt(24.0), rt(48.0))
        );
        assert_eq!(
            track.range_of_child_at_index(3).unwrap(),
            TimeRange::new(rt(72.0), rt(12.0))
        );
    }

    #[test]
    fn transition_range_straddles_cut() {
        let track = make_track();
        let r = track.range_of_child_at_index(1).unwrap();
        assert_eq!(r.start_time(), rt(18.0));
        assert_eq!(r.duration(), rt(12.0));
    }

    #[test]
    fn child_ranges_match_indexed_lookup() {
        let track = make_track();
        let ranges = track.child_ranges();
        assert_eq!(ranges.len(), 4);
        for (i, r) in ranges.iter().enumerate() {
            assert_eq!(r.unwrap(), track.range_of_child_at_index(i).unwrap());
        }
    }

    #[test]
    fn child_ranges_stop_after_failure() {
        let track = Track::new("V1", TrackKind::Video).with_children([
            clip("A", 24.0),
            Clip::new("no_media", None).into(),
            clip("B", 24.0),
        ]);
        let ranges = track.child_ranges();
        assert!(ranges[0].is_some());
        assert!(ranges[1].is_none());
        assert!(ranges[2].is_none());
    }

    #[test]
    fn track_available_range_ignores_transitions() {
        let track = make_track();
        let r = track.available_range().unwrap();
        assert_eq!(r.duration(), rt(84.0));
        assert_eq!(track.duration().unwrap(), rt(84.0));
    }

    #[test]
    fn empty_track_has_zero_duration() {
        let track = Track::new("V1", TrackKind::Video);
        assert_eq!(track.duration().unwrap(), RationalTime::ZERO);
    }

    #[test]
    fn stack_children_start_at_zero() {
        let stack = Stack::new("stack").with_children([clip("A", 24.0), clip("B", 48.0)]);
        assert_eq!(
            stack.range_of_child_at_index(1).unwrap(),
            TimeRange::new(rt(0.0), rt(48.0))
        );
        assert_eq!(stack.duration().unwrap(), rt(48.0));
    }

    #[test]
    fn insert_and_remove_children() {
        let mut track = make_track();
        assert!(matches!(
            track.insert_child(9, clip("X", 1.0)),
            Err(TimelineError::IndexOutOfRange { index: 9, len: 4 })
        ));
        track.insert_child(4, clip("X", 1.0)).unwrap();
        assert_eq!(track.children().len(), 5);

        let removed = track.remove_child(0).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(track.remove_child(10).is_err());
    }

    #[test]
    fn index_of_child_by_identity() {
        let track = make_track();
        let b = track.children()[2].id();
        assert_eq!(track.index_of_child(b).unwrap(), 2);

        let stranger = Gap::with_duration(rt(1.0));
        assert!(matches!(
            track.index_of_child(stranger.id()),
            Err(TimelineError::NotAChild { .. })
        ));
    }
}
