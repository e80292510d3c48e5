//! Lookups over a composition's children shared by every edit.
//!
//! Positions are computed with [`Composition::child_ranges`], so a scan over a
//! track is a single pass regardless of how many children it visits.

use cl_common::{RationalTime, TimeRange, DEFAULT_EPSILON};
use cl_timeline::{Composable, Composition, Gap, Item};

use crate::error::{EditError, EditResult};

/// Where a child sits: its index in the composition and the span it covers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemSlot {
    pub index: usize,
    pub range: TimeRange,
}

/// The first item whose range contains `time`. Transitions are never returned.
pub fn item_at_time<C>(comp: &C, time: RationalTime) -> Option<ItemSlot>
where
    C: Composition + ?Sized,
{
    comp.child_ranges()
        .into_iter()
        .enumerate()
        .find_map(|(index, range)| {
            let range = range?;
            let is_item = comp.children()[index].is_item();
            (is_item && range.contains(time)).then_some(ItemSlot { index, range })
        })
}

/// Every item whose range intersects `range`, in child order.
pub fn items_in_range<C>(comp: &C, range: &TimeRange) -> Vec<ItemSlot>
where
    C: Composition + ?Sized,
{
    slots_matching(comp, range, Composable::is_item)
}

/// Every transition whose range intersects `range`, in child order.
pub fn transitions_in_range<C>(comp: &C, range: &TimeRange) -> Vec<ItemSlot>
where
    C: Composition + ?Sized,
{
    slots_matching(comp, range, |c| c.as_transition().is_some())
}

fn slots_matching<C, P>(comp: &C, range: &TimeRange, predicate: P) -> Vec<ItemSlot>
where
    C: Composition + ?Sized,
    P: Fn(&Composable) -> bool,
{
    comp.child_ranges()
        .into_iter()
        .enumerate()
        .filter_map(|(index, child_range)| {
            let child_range = child_range?;
            let hit = predicate(&comp.children()[index])
                && range.intersects(&child_range, DEFAULT_EPSILON);
            hit.then_some(ItemSlot {
                index,
                range: child_range,
            })
        })
        .collect()
}

/// Remove transitions intersecting `range`. Returns whether any were removed.
pub fn remove_transitions_in_range<C>(comp: &mut C, range: &TimeRange) -> EditResult<bool>
where
    C: Composition + ?Sized,
{
    let slots = transitions_in_range(comp, range);
    // Highest index first so the remaining indices stay valid.
    for slot in slots.iter().rev() {
        comp.remove_child(slot.index)?;
    }
    Ok(!slots.is_empty())
}

/// Split `item`, which covers `item_range`, at composition time `time`.
///
/// At or before the start the whole item is the right part; at or after the
/// end it is the left part. Those cases return plain clones. A real split
/// returns two duplicates whose source ranges partition the original.
pub fn split_item_at_time(
    item: &Composable,
    item_range: &TimeRange,
    time: RationalTime,
) -> EditResult<(Option<Composable>, Option<Composable>)> {
    if time <= item_range.start_time() {
        return Ok((None, Some(item.clone())));
    }
    if time >= item_range.end_time_exclusive() {
        return Ok((Some(item.clone()), None));
    }

    let source = item
        .as_item()
        .ok_or_else(|| EditError::NotAnItem {
            operation: "split",
            name: item.name().to_string(),
        })?
        .trimmed_range()?;

    let offset = (time - item_range.start_time()).rescaled_to(source.start_time().rate());

    let mut first = item.duplicate();
    let mut second = item.duplicate();
    if let Some(part) = first.as_item_mut() {
        part.set_source_range(Some(TimeRange::new(source.start_time(), offset)));
    }
    if let Some(part) = second.as_item_mut() {
        part.set_source_range(Some(TimeRange::new(
            source.start_time() + offset,
            source.duration() - offset,
        )));
    }
    Ok((Some(first), Some(second)))
}

/// Clip `proposed` to the item's available range. Items without one are
/// returned unchanged. A start past the end collapses to zero duration.
pub fn clamp_to_available_range<I>(item: &I, proposed: TimeRange) -> TimeRange
where
    I: Item + ?Sized,
{
    let Ok(available) = item.available_range() else {
        return proposed;
    };

    let start = proposed.start_time().max(available.start_time());
    let end = proposed
        .end_time_exclusive()
        .min(available.end_time_exclusive());

    if start >= end {
        return TimeRange::new(start, RationalTime::zero(start.rate()));
    }
    TimeRange::from_start_end_time(start, end)
}

/// Sum of the visible children's durations; zero when there are none.
pub fn composition_duration<C>(comp: &C) -> EditResult<RationalTime>
where
    C: Composition + ?Sized,
{
    let mut total: Option<RationalTime> = None;
    for child in comp.children().iter().filter(|c| c.visible()) {
        let d = child.duration()?;
        total = Some(match total {
            Some(t) => t + d,
            None => d,
        });
    }
    Ok(total.unwrap_or(RationalTime::ZERO))
}

/// Index of the item just before `index`, if that neighbor is an item.
pub fn previous_item<C>(comp: &C, index: usize) -> Option<usize>
where
    C: Composition + ?Sized,
{
    let prev = index.checked_sub(1)?;
    comp.children()
        .get(prev)
        .filter(|c| c.is_item())
        .map(|_| prev)
}

/// Index of the item just after `index`, if that neighbor is an item.
pub fn next_item<C>(comp: &C, index: usize) -> Option<usize>
where
    C: Composition + ?Sized,
{
    let next = index + 1;
    comp.children()
        .get(next)
        .filter(|c| c.is_item())
        .map(|_| next)
}

/// A filler gap of `duration`, copied from `template` when one is given.
pub fn create_fill_gap(duration: RationalTime, template: Option<&Gap>) -> Gap {
    let range = TimeRange::new(RationalTime::zero(duration.rate()), duration);
    match template {
        Some(template) => {
            let mut gap = template.duplicate();
            gap.set_source_range(Some(range));
            gap
        }
        None => Gap::with_duration(duration),
    }
}
