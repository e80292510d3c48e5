use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composable, Composition};

use super::{insert_all, placeable};
use crate::error::EditResult;
use crate::options::InsertOptions;
use crate::query::{
    composition_duration, create_fill_gap, item_at_time, remove_transitions_in_range,
    split_item_at_time,
};

const OP: &str = "insert";

/// Insert a copy of `item` at `time`, pushing later material back.
///
/// - At or before zero the item is prepended.
/// - At or past the end it is appended, after a filler gap covering any
///   distance beyond the end.
/// - Otherwise the item at `time` is split and the new item goes between the
///   halves; landing exactly on an item's start inserts before that item.
pub fn insert<C>(
    comp: &mut C,
    item: &Composable,
    time: RationalTime,
    options: &InsertOptions,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    let new_item = placeable(item, OP)?;
    let template = options.fill_template.as_ref();
    let duration = composition_duration(comp)?;

    if comp.children().is_empty() || duration.value() == 0.0 {
        if time.is_positive() {
            comp.append_child(create_fill_gap(time, template).into());
        }
        comp.append_child(new_item);
        tracing::debug!(operation = OP, time = %time, "inserted into empty composition");
        return Ok(());
    }

    if time <= RationalTime::zero(time.rate()) {
        comp.insert_child(0, new_item)?;
        tracing::debug!(operation = OP, index = 0, "prepended item");
        return Ok(());
    }

    if time >= duration {
        let shortfall = time - duration;
        if shortfall.is_positive() {
            comp.append_child(create_fill_gap(shortfall, template).into());
        }
        comp.append_child(new_item);
        tracing::debug!(operation = OP, shortfall = %shortfall, "appended item");
        return Ok(());
    }

    if options.remove_transitions {
        let point = TimeRange::new(time, RationalTime::zero(time.rate()));
        remove_transitions_in_range(comp, &point)?;
    }

    let Some(slot) = item_at_time(comp, time) else {
        comp.append_child(new_item);
        return Ok(());
    };

    if time == slot.range.start_time() {
        comp.insert_child(slot.index, new_item)?;
        tracing::debug!(operation = OP, index = slot.index, "inserted at item boundary");
        return Ok(());
    }

    let (left, right) = split_item_at_time(&comp.children()[slot.index], &slot.range, time)?;
    comp.remove_child(slot.index)?;
    insert_all(
        comp,
        slot.index,
        left.into_iter().chain(Some(new_item)).chain(right),
    )?;
    tracing::debug!(operation = OP, index = slot.index, time = %time, "inserted by splitting item");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;
    use cl_timeline::{Clip, Gap, Track, TrackKind, Transition};

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn range(start: f64, duration: f64) -> TimeRange {
        TimeRange::new(rt(start), rt(duration))
    }

    fn clip(name: &str, duration: f64) -> Composable {
        Clip::new(name, Some(range(0.0, duration))).into()
    }

    fn names(track: &Track) -> Vec<&str> {
        track.children.iter().map(|c| c.name()).collect()
    }

    fn make_track() -> Track {
        Track::new("V1", TrackKind::Video).with_children([clip("A", 24.0), clip("B", 48.0)])
    }

    #[test]
    fn insert_splits_item_and_grows() {
        let mut track = make_track();
        insert(&mut track, &clip("X", 10.0), rt(36.0), &InsertOptions::default()).unwrap();

        assert_eq!(names(&track), vec!["A", "B", "X", "B"]);
        assert_eq!(track.children[1].duration().unwrap(), rt(12.0));
        assert_eq!(track.children[3].duration().unwrap(), rt(36.0));
        assert_eq!(composition_duration(&track).unwrap(), rt(82.0));
    }

    #[test]
    fn insert_on_boundary_goes_before() {
        let mut track = make_track();
        insert(&mut track, &clip("X", 10.0), rt(24.0), &InsertOptions::default()).unwrap();
        assert_eq!(names(&track), vec!["A", "X", "B"]);
    }

    #[test]
    fn insert_prepends_and_appends() {
        let mut track = make_track();
        insert(&mut track, &clip("first", 1.0), rt(-5.0), &InsertOptions::default()).unwrap();
        insert(&mut track, &clip("last", 1.0), rt(73.0), &InsertOptions::default()).unwrap();
        assert_eq!(names(&track), vec!["first", "A", "B", "last"]);
    }

    #[test]
    fn insert_past_end_adds_filler() {
        let mut track = make_track();
        let options = InsertOptions {
            fill_template: Some(Gap::new("slug", None)),
            ..InsertOptions::default()
        };
        insert(&mut track, &clip("X", 10.0), rt(80.0), &options).unwrap();
        assert_eq!(names(&track), vec!["A", "B", "slug", "X"]);
        assert_eq!(track.children[2].duration().unwrap(), rt(8.0));
        assert_eq!(composition_duration(&track).unwrap(), rt(90.0));
    }

    #[test]
    fn insert_into_empty_track() {
        let mut track = Track::new("V1", TrackKind::Video);
        insert(&mut track, &clip("X", 10.0), rt(5.0), &InsertOptions::default()).unwrap();
        assert_eq!(track.children.len(), 2);
        assert!(track.children[0].as_gap().is_some());
        assert_eq!(composition_duration(&track).unwrap(), rt(15.0));
    }

    #[test]
    fn insert_removes_transition_at_point() {
        let mut track = make_track();
        track
            .insert_child(1, Transition::new("x", rt(4.0), rt(4.0)).into())
            .unwrap();
        insert(&mut track, &clip("X", 10.0), rt(24.0), &InsertOptions::default()).unwrap();
        assert_eq!(names(&track), vec!["A", "X", "B"]);

        let mut track = make_track();
        track
            .insert_child(1, Transition::new("x", rt(4.0), rt(4.0)).into())
            .unwrap();
        let keep = InsertOptions {
            remove_transitions: false,
            ..InsertOptions::default()
        };
        insert(&mut track, &clip("X", 10.0), rt(24.0), &keep).unwrap();
        assert_eq!(names(&track), vec!["A", "x", "X", "B"]);
    }

    #[test]
    fn inserted_item_is_a_copy() {
        let mut track = make_track();
        let x = clip("X", 10.0);
        insert(&mut track, &x, rt(0.0), &InsertOptions::default()).unwrap();
        assert_ne!(track.children[0].id(), x.id());
    }

    #[test]
    fn transitions_cannot_be_inserted() {
        let mut track = make_track();
        let t: Composable = Transition::new("x", rt(1.0), rt(1.0)).into();
        assert!(matches!(
            insert(&mut track, &t, rt(5.0), &InsertOptions::default()),
            Err(EditError::NotAnItem { operation: "insert", .. })
        ));
    }
}
