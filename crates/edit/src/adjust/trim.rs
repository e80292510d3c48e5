use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composable, Composition, NodeId};

use super::{item_at, locate, set_range_at};
use crate::error::{EditError, EditResult};
use crate::options::TrimOptions;
use crate::query::{create_fill_gap, next_item, previous_item};

const OP: &str = "trim";

/// What happens to the neighbor on one side of the trimmed item.
enum NeighborChange {
    SetRange(usize, TimeRange),
    Remove(usize),
    InsertGap(usize, RationalTime),
}

/// Move the in point by `delta_in` and the out point by `delta_out`, letting
/// the neighbors absorb the change so the composition keeps its duration.
///
/// - Head: the previous item grows or shrinks by the effective delta (never
///   below zero). Without one, pulling the head earlier inserts a gap before.
/// - Tail: the next item's head moves by the effective delta. A gap that would
///   drop to zero is removed. Without a next item, pulling the tail in inserts
///   a gap right after the item and any transitions that follow it.
///
/// Both points are clamped to the item's available range; neighbors see the
/// clamped delta.
pub fn trim<C>(
    comp: &mut C,
    item: NodeId,
    delta_in: RationalTime,
    delta_out: RationalTime,
    options: &TrimOptions,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    if delta_in.value() == 0.0 && delta_out.value() == 0.0 {
        return Ok(());
    }

    let index = locate(comp, item, OP)?;
    let target = item_at(comp, index, OP)?;
    let mut source = target.trimmed_range()?;
    let available = target.available_range().ok();

    let mut head_change = None;
    let mut effective_in = RationalTime::zero(delta_in.rate());
    if delta_in.value() != 0.0 {
        let mut new_start = source.start_time() + delta_in;
        let mut new_duration = source.duration() - delta_in;
        if new_duration.is_zero_or_negative() {
            return Err(EditError::NegativeDuration { operation: OP });
        }

        if let Some(available) = available {
            if new_start < available.start_time() {
                // Keep the out point where it is.
                let diff = available.start_time() - new_start;
                new_start = available.start_time();
                new_duration = new_duration - diff;
                if new_duration.is_zero_or_negative() {
                    return Err(EditError::NegativeDuration { operation: OP });
                }
            }
        }

        effective_in = new_start - source.start_time();
        if effective_in != delta_in {
            tracing::debug!(
                operation = OP,
                requested = %delta_in,
                effective = %effective_in,
                "head trim clamped to available range"
            );
        }

        head_change = match previous_item(comp, index) {
            Some(prev) => {
                let prev_range = item_at(comp, prev, OP)?.trimmed_range()?;
                let mut duration = prev_range.duration() + effective_in;
                if duration.value() < 0.0 {
                    duration = RationalTime::zero(prev_range.duration().rate());
                }
                Some(NeighborChange::SetRange(
                    prev,
                    TimeRange::new(prev_range.start_time(), duration),
                ))
            }
            None if effective_in.value() < 0.0 => {
                Some(NeighborChange::InsertGap(index, -effective_in))
            }
            None => None,
        };

        source = TimeRange::new(new_start, new_duration);
    }

    let mut tail_change = None;
    let mut effective_out = RationalTime::zero(delta_out.rate());
    if delta_out.value() != 0.0 {
        let mut new_duration = source.duration() + delta_out;
        if new_duration.is_zero_or_negative() {
            return Err(EditError::NegativeDuration { operation: OP });
        }

        if let Some(available) = available {
            let max_duration = available.end_time_exclusive() - source.start_time();
            if new_duration > max_duration {
                new_duration = max_duration;
                if new_duration.is_zero_or_negative() {
                    return Err(EditError::NegativeDuration { operation: OP });
                }
            }
        }

        effective_out = new_duration - source.duration();
        if effective_out != delta_out {
            tracing::debug!(
                operation = OP,
                requested = %delta_out,
                effective = %effective_out,
                "tail trim clamped to available range"
            );
        }

        tail_change = match next_item(comp, index) {
            Some(next) => {
                let neighbor = comp.child(next)?;
                let next_range = item_at(comp, next, OP)?.trimmed_range()?;
                let start = next_range.start_time() + effective_out;
                let mut duration = next_range.duration() - effective_out;
                match neighbor {
                    Composable::Gap(_) if duration.is_zero_or_negative() => {
                        Some(NeighborChange::Remove(next))
                    }
                    _ => {
                        if duration.value() < 0.0 {
                            duration = RationalTime::zero(next_range.duration().rate());
                        }
                        Some(NeighborChange::SetRange(next, TimeRange::new(start, duration)))
                    }
                }
            }
            None if effective_out.value() < 0.0 => {
                // Transitions hanging off the out point stay attached to it.
                let after = comp.children()[index + 1..]
                    .iter()
                    .take_while(|c| c.as_transition().is_some())
                    .count();
                Some(NeighborChange::InsertGap(index + 1 + after, -effective_out))
            }
            None => None,
        };

        source = TimeRange::new(source.start_time(), new_duration);
    }

    set_range_at(comp, index, source, OP)?;
    // Tail first: its indices sit after the item, the head's at or before it.
    for change in [tail_change, head_change].into_iter().flatten() {
        match change {
            NeighborChange::SetRange(i, range) => set_range_at(comp, i, range, OP)?,
            NeighborChange::Remove(i) => {
                comp.remove_child(i)?;
            }
            NeighborChange::InsertGap(i, duration) => {
                let gap = create_fill_gap(duration, options.fill_template.as_ref());
                comp.insert_child(i, gap.into())?;
            }
        }
    }

    tracing::debug!(
        operation = OP,
        index,
        delta_in = %effective_in,
        delta_out = %effective_out,
        "trimmed item"
    );
    Ok(())
}
