use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composable, Composition};

use super::{insert_all, placeable, remove_all};
use crate::error::{EditError, EditResult};
use crate::options::OverwriteOptions;
use crate::query::{
    composition_duration, create_fill_gap, items_in_range, remove_transitions_in_range,
    split_item_at_time,
};

const OP: &str = "overwrite";

/// Replace whatever occupies `range` with a copy of `item`.
///
/// An item without a source range is cut to `range`'s duration from the start
/// of its available range. Items straddling either end of `range` are split
/// and keep their outer parts. Ranges wholly before or after the composition
/// place the item at that end with a filler gap between.
pub fn overwrite<C>(
    comp: &mut C,
    item: &Composable,
    range: TimeRange,
    options: &OverwriteOptions,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    if range.duration().value() < 0.0 {
        return Err(EditError::InvalidRange {
            operation: OP,
            range,
        });
    }

    let mut new_item = placeable(item, OP)?;
    if let Some(placed) = new_item.as_item_mut() {
        if placed.source_range().is_none() {
            if let Ok(available) = placed.available_range() {
                placed.set_source_range(Some(TimeRange::new(
                    available.start_time(),
                    range.duration(),
                )));
            }
        }
    }

    let template = options.fill_template.as_ref();
    let start = range.start_time();
    let end = range.end_time_exclusive();

    let duration = composition_duration(comp)?;
    if comp.children().is_empty() || duration.value() == 0.0 {
        if start.is_positive() {
            comp.append_child(create_fill_gap(start, template).into());
        }
        comp.append_child(new_item);
        tracing::debug!(operation = OP, range = %range, "overwrote empty composition");
        return Ok(());
    }

    if options.remove_transitions {
        remove_transitions_in_range(comp, &range)?;
    }
    let duration = composition_duration(comp)?;

    if start >= duration {
        let shortfall = start - duration;
        if shortfall.is_positive() {
            comp.append_child(create_fill_gap(shortfall, template).into());
        }
        comp.append_child(new_item);
        tracing::debug!(operation = OP, shortfall = %shortfall, "overwrote past end");
        return Ok(());
    }

    let zero = RationalTime::zero(end.rate());
    if end <= zero {
        let lead = zero - end;
        comp.insert_child(0, new_item)?;
        if lead.is_positive() {
            comp.insert_child(1, create_fill_gap(lead, template).into())?;
        }
        tracing::debug!(operation = OP, lead = %lead, "overwrote before start");
        return Ok(());
    }

    let slots = items_in_range(comp, &range);
    let (Some(first), Some(last)) = (slots.first().copied(), slots.last().copied()) else {
        comp.append_child(new_item);
        return Ok(());
    };

    // Split before touching the child list so a failure leaves it intact.
    let leading = if start > first.range.start_time() {
        split_item_at_time(&comp.children()[first.index], &first.range, start)?.0
    } else {
        None
    };
    let trailing = if end < last.range.end_time_exclusive() {
        split_item_at_time(&comp.children()[last.index], &last.range, end)?.1
    } else {
        None
    };

    let indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
    remove_all(comp, &indices)?;
    insert_all(
        comp,
        first.index,
        leading.into_iter().chain(Some(new_item)).chain(trailing),
    )?;

    tracing::debug!(
        operation = OP,
        index = first.index,
        replaced = indices.len(),
        range = %range,
        "overwrote range"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_timeline::{Clip, Item, Track, TrackKind, Transition};

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
        Track::new("V1", TrackKind::Video).with_children([
            clip("A", 24.0),
            clip("B", 24.0),
            clip("C", 24.0),
        ])
    }

    #[test]
    fn overwrite_across_items_keeps_outer_parts() {
        let mut track = make_track();
        overwrite(&mut track, &clip("X", 24.0), range(12.0, 24.0), &OverwriteOptions::default())
            .unwrap();

        assert_eq!(names(&track), vec!["A", "X", "B", "C"]);
        assert_eq!(track.children[0].duration().unwrap(), rt(12.0));
        let tail = track.children[2].as_item().unwrap().source_range().unwrap();
        assert_eq!(tail, range(12.0, 12.0));
        assert_eq!(composition_duration(&track).unwrap(), rt(72.0));
    }

    #[test]
    fn overwrite_exact_item() {
        let mut track = make_track();
        overwrite(&mut track, &clip("X", 24.0), range(24.0, 24.0), &OverwriteOptions::default())
            .unwrap();
        assert_eq!(names(&track), vec!["A", "X", "C"]);
    }

    #[test]
    fn overwrite_inside_one_item() {
        let mut track = make_track();
        overwrite(&mut track, &clip("X", 4.0), range(30.0, 4.0), &OverwriteOptions::default())
            .unwrap();
        assert_eq!(names(&track), vec!["A", "B", "X", "B", "C"]);
        assert_eq!(composition_duration(&track).unwrap(), rt(72.0));
    }

    #[test]
    fn overwrite_past_end_adds_filler() {
        let mut track = make_track();
        overwrite(&mut track, &clip("X", 10.0), range(80.0, 10.0), &OverwriteOptions::default())
            .unwrap();
        assert_eq!(track.children.len(), 5);
        assert!(track.children[3].as_gap().is_some());
        assert_eq!(track.children[3].duration().unwrap(), rt(8.0));
    }

    #[test]
    fn overwrite_before_start_prepends_with_gap() {
        let mut track = make_track();
        overwrite(&mut track, &clip("X", 10.0), range(-20.0, 10.0), &OverwriteOptions::default())
            .unwrap();
        assert_eq!(track.children[0].name(), "X");
        assert!(track.children[1].as_gap().is_some());
        assert_eq!(track.children[1].duration().unwrap(), rt(10.0));
    }

    #[test]
    fn overwrite_trims_unbounded_item_to_range() {
        let mut track = make_track();
        let long: Composable = Clip::new("L", None).with_available_range(range(5.0, 500.0)).into();
        overwrite(&mut track, &long, range(24.0, 24.0), &OverwriteOptions::default()).unwrap();
        let placed = track.children[1].as_item().unwrap().source_range().unwrap();
        assert_eq!(placed, range(5.0, 24.0));
    }

    #[test]
    fn overwrite_removes_transitions_in_range() {
        let mut track = make_track();
        track
            .insert_child(1, Transition::new("x", rt(4.0), rt(4.0)).into())
            .unwrap();
        overwrite(&mut track, &clip("X", 8.0), range(20.0, 8.0), &OverwriteOptions::default())
            .unwrap();
        assert!(track.children.iter().all(|c| c.visible()));
        assert_eq!(names(&track), vec!["A", "X", "B", "C"]);
    }

    #[test]
    fn overwrite_rejects_negative_range() {
        let mut track = make_track();
        match overwrite(&mut track, &clip("X", 8.0), range(0.0, -8.0), &OverwriteOptions::default())
            .unwrap_err()
        {
            EditError::InvalidRange { operation, .. } => assert_eq!(operation, "overwrite"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(track.children.len(), 3);
    }
}
