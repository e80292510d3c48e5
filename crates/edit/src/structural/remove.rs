use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composable, Composition};

use super::{insert_all, remove_all};
use crate::error::{EditError, EditResult};
use crate::options::RemoveOptions;
use crate::query::{
    create_fill_gap, item_at_time, items_in_range, remove_transitions_in_range,
    split_item_at_time,
};

/// Remove the item at `time`, leaving a gap of the same duration when
/// `options.fill` is set.
pub fn remove<C>(comp: &mut C, time: RationalTime, options: &RemoveOptions) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    let Some(slot) = item_at_time(comp, time) else {
        return Err(EditError::InvalidTime {
            operation: "remove",
            time,
        });
    };

    let removed = comp.remove_child(slot.index)?;
    if options.fill {
        let gap = create_fill_gap(slot.range.duration(), options.fill_template.as_ref());
        comp.insert_child(slot.index, gap.into())?;
    }

    tracing::debug!(
        operation = "remove",
        index = slot.index,
        name = removed.name(),
        filled = options.fill,
        "removed item"
    );
    Ok(())
}

/// Remove everything inside `range`, splitting items that cross its ends.
///
/// Transitions intersecting the range go with it. When `options.fill` is set
/// one gap of `range`'s duration sits between the kept remainders.
pub fn remove_range<C>(comp: &mut C, range: TimeRange, options: &RemoveOptions) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    const OP: &str = "remove_range";

    if range.duration().value() < 0.0 {
        return Err(EditError::InvalidRange {
            operation: OP,
            range,
        });
    }

    let start = range.start_time();
    let end = range.end_time_exclusive();

    let slots = items_in_range(comp, &range);
    if slots.is_empty() {
        return Ok(());
    }
    remove_transitions_in_range(comp, &range)?;
    let slots = items_in_range(comp, &range);
    let (Some(first), Some(last)) = (slots.first().copied(), slots.last().copied()) else {
        return Ok(());
    };

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

    let filler = (options.fill && range.duration().is_positive()).then(|| {
        Composable::from(create_fill_gap(range.duration(), options.fill_template.as_ref()))
    });

    let filled = filler.is_some();
    let indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
    remove_all(comp, &indices)?;
    insert_all(
        comp,
        first.index,
        leading.into_iter().chain(filler).chain(trailing),
    )?;

    tracing::debug!(
        operation = OP,
        range = %range,
        removed = indices.len(),
        filled,
        "removed range"
    );
    Ok(())
}
