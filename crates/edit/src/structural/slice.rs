use cl_common::{RationalTime, TimeRange};
use cl_timeline::Composition;

use super::insert_all;
use crate::error::{EditError, EditResult};
use crate::options::SliceOptions;
use crate::query::{
    composition_duration, item_at_time, remove_transitions_in_range, split_item_at_time,
    transitions_in_range,
};

const OP: &str = "slice";

/// Cut the item at `time` into two items that together cover the same span.
///
/// Times outside the composition, and times on an existing cut, change
/// nothing, even when a transition sits on that cut. A transition reaching
/// over `time` inside an item is removed first, or the slice fails when
/// `options.remove_transitions` is off.
pub fn slice<C>(comp: &mut C, time: RationalTime, options: &SliceOptions) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    let duration = composition_duration(comp)?;
    if time <= RationalTime::zero(time.rate()) || time >= duration {
        return Ok(());
    }

    let Some(mut slot) = item_at_time(comp, time) else {
        return Ok(());
    };
    if time == slot.range.start_time() || time == slot.range.end_time_exclusive() {
        return Ok(());
    }

    let point = TimeRange::new(time, RationalTime::zero(time.rate()));
    if !transitions_in_range(comp, &point).is_empty() {
        if !options.remove_transitions {
            return Err(EditError::CannotTrimTransition {
                operation: OP,
                time,
            });
        }
        remove_transitions_in_range(comp, &point)?;
        // Removal shifts indices; the item still covers `time`.
        let Some(moved) = item_at_time(comp, time) else {
            return Ok(());
        };
        slot = moved;
    }

    let (left, right) = split_item_at_time(&comp.children()[slot.index], &slot.range, time)?;
    comp.remove_child(slot.index)?;
    insert_all(comp, slot.index, left.into_iter().chain(right))?;

    tracing::debug!(operation = OP, index = slot.index, time = %time, "sliced item");
    Ok(())
}
