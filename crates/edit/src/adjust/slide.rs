use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composition, NodeId};

use super::{item_at, locate, set_range_at};
use crate::error::EditResult;
use crate::query::previous_item;

const OP: &str = "slide";

/// Move `item` along the track by `delta` by resizing the item before it.
///
/// The item itself keeps its source range. The previous item's duration is
/// clamped to `[0, available duration]`; whatever delta survives the clamp is
/// how far the item moves. The first item cannot slide.
pub fn slide<C>(comp: &mut C, item: NodeId, delta: RationalTime) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    if delta.value() == 0.0 {
        return Ok(());
    }

    let index = locate(comp, item, OP)?;
    let Some(prev) = previous_item(comp, index) else {
        return Ok(());
    };

    let neighbor = item_at(comp, prev, OP)?;
    let prev_range = neighbor.trimmed_range()?;
    let prev_available = neighbor.available_range().ok();

    let mut duration = prev_range.duration() + delta;
    if duration.is_zero_or_negative() {
        duration = RationalTime::zero(prev_range.duration().rate());
    }
    if let Some(available) = prev_available {
        if duration > available.duration() {
            duration = available.duration();
        }
    }
    let effective = duration - prev_range.duration();

    set_range_at(comp, prev, TimeRange::new(prev_range.start_time(), duration), OP)?;

    tracing::debug!(
        operation = OP,
        index,
        requested = %delta,
        effective = %effective,
        "slid item"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;
    use cl_timeline::{Clip, Composable, Item, Track, TrackKind, Transition};

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn range(start: f64, duration: f64) -> TimeRange {
        TimeRange::new(rt(start), rt(duration))
    }

    fn make_track() -> Track {
        Track::new("V1", TrackKind::Video).with_children([
            Composable::from(Clip::new("A", Some(range(0.0, 24.0))).with_available_range(range(0.0, 30.0))),
            Composable::from(Clip::new("B", Some(range(0.0, 24.0)))),
        ])
    }

    fn source_of(track: &Track, index: usize) -> TimeRange {
        track.children[index].as_item().unwrap().source_range().unwrap()
    }

    #[test]
    fn slide_right_grows_previous() {
        let mut track = make_track();
        let b = track.children[1].id();
        slide(&mut track, b, rt(4.0)).unwrap();
        assert_eq!(source_of(&track, 0), range(0.0, 28.0));
        assert_eq!(source_of(&track, 1), range(0.0, 24.0));
        assert_eq!(track.range_of_child_at_index(1).unwrap().start_time(), rt(28.0));
    }

    #[test]
    fn slide_clamped_to_previous_available() {
        let mut track = make_track();
        let b = track.children[1].id();
        slide(&mut track, b, rt(20.0)).unwrap();
        assert_eq!(source_of(&track, 0), range(0.0, 30.0));
    }

    #[test]
    fn slide_left_floors_previous_at_zero() {
        let mut track = make_track();
        let b = track.children[1].id();
        slide(&mut track, b, rt(-40.0)).unwrap();
        assert_eq!(source_of(&track, 0), range(0.0, 0.0));
    }

    #[test]
    fn first_item_does_not_slide() {
        let mut track = make_track();
        let a = track.children[0].id();
        slide(&mut track, a, rt(5.0)).unwrap();
        assert_eq!(source_of(&track, 0), range(0.0, 24.0));
    }

    #[test]
    fn transition_before_item_blocks_slide() {
        let mut track = make_track();
        track
            .insert_child(1, Transition::new("x", rt(2.0), rt(2.0)).into())
            .unwrap();
        let b = track.children[2].id();
        slide(&mut track, b, rt(5.0)).unwrap();
        assert_eq!(source_of(&track, 0), range(0.0, 24.0));
    }

    #[test]
    fn slide_requires_membership() {
        let mut track = make_track();
        let stranger = Clip::new("X", None);
        assert!(matches!(
            slide(&mut track, stranger.id(), rt(1.0)),
            Err(EditError::NotAChildOf { operation: "slide", .. })
        ));
    }
}
