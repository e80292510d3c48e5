use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composition, NodeId};

use super::{item_at, locate, set_range_at};
use crate::error::{EditError, EditResult};
use crate::query::{next_item, previous_item};

const OP: &str = "roll";

/// Roll the edit points on either side of `item`.
///
/// The in point trades time with the previous item and the out point with the
/// next item, so the composition keeps its duration. Deltas are clamped to
/// what the neighbor can give and to the item's available start.
///
/// At the ends of the track only growing the item outward is meaningful:
/// a positive `delta_in` trims the head, a positive `delta_out` extends the
/// tail up to the available end. Negative deltas without a neighbor do nothing.
pub fn roll<C>(
    comp: &mut C,
    item: NodeId,
    delta_in: RationalTime,
    delta_out: RationalTime,
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

    let mut prev_change = None;
    let mut effective_in = RationalTime::zero(delta_in.rate());
    if delta_in.value() != 0.0 {
        match previous_item(comp, index) {
            None if delta_in.is_positive() => {
                let duration = source.duration() - delta_in;
                if duration.is_zero_or_negative() {
                    return Err(EditError::NegativeDuration { operation: OP });
                }
                effective_in = delta_in;
                source = TimeRange::new(source.start_time() + delta_in, duration);
            }
            None => {}
            Some(prev) => {
                let prev_range = item_at(comp, prev, OP)?.trimmed_range()?;
                let mut delta = delta_in;

                if let Some(available) = available {
                    if source.start_time() + delta < available.start_time() {
                        delta = available.start_time() - source.start_time();
                    }
                }
                // The previous item can neither give nor take more than it has.
                let limit = prev_range.duration();
                if delta > limit {
                    delta = limit;
                } else if -delta > limit {
                    delta = -limit;
                }

                let duration = source.duration() - delta;
                if duration.is_zero_or_negative() {
                    return Err(EditError::NegativeDuration { operation: OP });
                }
                let prev_duration = (prev_range.duration() + delta)
                    .max(RationalTime::zero(prev_range.duration().rate()));

                effective_in = delta;
                source = TimeRange::new(source.start_time() + delta, duration);
                prev_change = Some((
                    prev,
                    TimeRange::new(prev_range.start_time(), prev_duration),
                ));
            }
        }
    }

    let mut next_change = None;
    let mut effective_out = RationalTime::zero(delta_out.rate());
    if delta_out.value() != 0.0 {
        match next_item(comp, index) {
            None if delta_out.is_positive() => {
                let duration = match available {
                    Some(available) => {
                        let end = (source.end_time_exclusive() + delta_out)
                            .min(available.end_time_exclusive());
                        end - source.start_time()
                    }
                    None => source.duration() + delta_out,
                };
                effective_out = duration - source.duration();
                source = TimeRange::new(source.start_time(), duration);
            }
            None => {}
            Some(next) => {
                let next_range = item_at(comp, next, OP)?.trimmed_range()?;
                let mut delta = delta_out;

                if delta > next_range.duration() {
                    delta = next_range.duration();
                }
                if delta.is_zero_or_negative() && (source.duration() + delta).is_zero_or_negative() {
                    // Leave one frame of the item.
                    let frame = RationalTime::new(1.0, source.duration().rate());
                    delta = -source.duration() + frame;
                }

                let duration = source.duration() + delta;
                if duration.is_zero_or_negative() {
                    return Err(EditError::NegativeDuration { operation: OP });
                }
                let next_duration = (next_range.duration() - delta)
                    .max(RationalTime::zero(next_range.duration().rate()));

                effective_out = delta;
                source = TimeRange::new(source.start_time(), duration);
                next_change = Some((
                    next,
                    TimeRange::new(next_range.start_time() + delta, next_duration),
                ));
            }
        }
    }

    if effective_in != delta_in || effective_out != delta_out {
        tracing::debug!(
            operation = OP,
            requested_in = %delta_in,
            requested_out = %delta_out,
            effective_in = %effective_in,
            effective_out = %effective_out,
            "roll clamped"
        );
    }

    set_range_at(comp, index, source, OP)?;
    for (i, range) in [next_change, prev_change].into_iter().flatten() {
        set_range_at(comp, i, range, OP)?;
    }

    tracing::debug!(
        operation = OP,
        index,
        delta_in = %effective_in,
        delta_out = %effective_out,
        "rolled edit points"
    );
    Ok(())
}
