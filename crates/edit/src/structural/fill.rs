use cl_common::{RationalTime, TimeRange};
use cl_timeline::{Composable, Composition, Effect, Gap};

use super::{overwrite, placeable};
use crate::error::{EditError, EditResult};
use crate::options::{OverwriteOptions, ReferencePoint};
use crate::query::item_at_time;

const OP: &str = "fill";

/// Place a copy of `item` into the gap at `time`.
///
/// `reference` decides how the item's duration meets the gap's: see
/// [`ReferencePoint`].
pub fn fill<C>(
    comp: &mut C,
    item: &Composable,
    time: RationalTime,
    reference: ReferencePoint,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    let Some(slot) = item_at_time(comp, time) else {
        return Err(EditError::InvalidTime {
            operation: OP,
            time,
        });
    };
    if comp.children()[slot.index].as_gap().is_none() {
        return Err(EditError::NotAGap { time });
    }
    let gap_duration = slot.range.duration();

    let mut new_item = placeable(item, OP)?;
    let clip_range = match new_item.as_item() {
        Some(placed) => placed.trimmed_range()?,
        None => {
            return Err(EditError::NotAnItem {
                operation: OP,
                name: item.name().to_string(),
            })
        }
    };

    tracing::debug!(
        operation = OP,
        index = slot.index,
        reference = %reference,
        gap = %gap_duration,
        item = %clip_range.duration(),
        "filling gap"
    );

    match reference {
        ReferencePoint::Source => {
            let range = TimeRange::new(slot.range.start_time(), clip_range.duration());
            overwrite(comp, &new_item, range, &OverwriteOptions::default())
        }
        ReferencePoint::Sequence => {
            let clip_duration = clip_range.duration();
            let remaining = gap_duration - clip_duration;
            let duration = clip_duration.min(gap_duration);
            set_source(&mut new_item, TimeRange::new(clip_range.start_time(), duration));

            comp.remove_child(slot.index)?;
            comp.insert_child(slot.index, new_item)?;
            if remaining.is_positive() {
                comp.insert_child(slot.index + 1, Gap::with_duration(remaining).into())?;
            }
            Ok(())
        }
        ReferencePoint::Fit => {
            let clip_seconds = clip_range.duration().to_seconds();
            let gap_seconds = gap_duration.to_seconds();
            if clip_seconds == 0.0 || gap_seconds == 0.0 {
                return Err(EditError::NegativeDuration { operation: OP });
            }
            let scalar = clip_seconds / gap_seconds;

            if let Some(placed) = new_item.as_item_mut() {
                let mut effects = placed.effects().to_vec();
                effects.push(Effect::linear_time_warp("time_fit", scalar));
                placed.set_effects(effects);
                placed.set_source_range(Some(clip_range));
            }

            comp.remove_child(slot.index)?;
            comp.insert_child(slot.index, new_item)?;
            tracing::debug!(operation = OP, time_scalar = scalar, "fit item to gap");
            Ok(())
        }
    }
}

fn set_source(item: &mut Composable, range: TimeRange) {
    if let Some(placed) = item.as_item_mut() {
        placed.set_source_range(Some(range));
    }
}
