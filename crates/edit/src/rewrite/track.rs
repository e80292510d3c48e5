use cl_common::{TimeRange, DEFAULT_EPSILON};
use cl_timeline::{Composable, Composition, Item, Track};
use tracing::debug;

use super::resourced;
use crate::error::EditResult;
use crate::range::intersect_ranges;

fn empty_like(track: &Track) -> Track {
    let mut result = Track::new(track.name(), track.kind);
    result.set_source_range(track.source_range());
    result
}

/// A copy of `track` holding only what lies inside `range`.
///
/// Items crossing either end are cut to the intersection. Transitions are
/// dropped and nothing is ever padded, so the result is never longer than
/// `range`.
pub fn track_trimmed_to_range(track: &Track, range: TimeRange) -> EditResult<Track> {
    let mut result = empty_like(track);

    for (child, child_range) in track.children.iter().zip(track.child_ranges()) {
        let Some(child_range) = child_range else {
            continue;
        };
        if !child.is_item() || !child_range.intersects(&range, DEFAULT_EPSILON) {
            continue;
        }
        let overlap = intersect_ranges(&child_range, &range);
        result.children.push(resourced(child, &child_range, &overlap)?);
    }

    debug!(
        track = track.name(),
        range = %range,
        kept = result.children.len(),
        "trimmed track to range"
    );
    Ok(result)
}

/// A copy of `track` with every transition's overlap spelled out.
///
/// `[A, T, B]` becomes `[A', A_overlap, T, B_overlap, B']`: the overlaps are
/// copies of the neighbors cut to `T`'s in and out offsets, and `A'` and `B'`
/// give those frames up so the track keeps its duration.
pub fn track_with_expanded_transitions(track: &Track) -> EditResult<Track> {
    let mut result = empty_like(track);
    let children = &track.children;

    for (index, child) in children.iter().enumerate() {
        let prev = index.checked_sub(1).and_then(|i| children.get(i));
        let next = children.get(index + 1);

        let Some(transition) = child.as_transition() else {
            let mut copy = child.duplicate();
            if let Some(item) = copy.as_item_mut() {
                if let Ok(source) = item.trimmed_range() {
                    let head = prev
                        .and_then(Composable::as_transition)
                        .map(|t| t.out_offset());
                    let tail = next
                        .and_then(Composable::as_transition)
                        .map(|t| t.in_offset());

                    let mut start = source.start_time();
                    let mut end = source.end_time_exclusive();
                    if let Some(head) = head {
                        start = start + head;
                    }
                    if let Some(tail) = tail {
                        end = end - tail;
                    }
                    if head.is_some() || tail.is_some() {
                        item.set_source_range(Some(TimeRange::from_start_end_time(start, end)));
                    }
                }
            }
            result.children.push(copy);
            continue;
        };

        if let Some(outgoing) = prev.filter(|c| c.is_item()) {
            result.children.push(overlap_copy(outgoing, |source| {
                TimeRange::new(
                    source.end_time_exclusive() - transition.in_offset(),
                    transition.in_offset(),
                )
            }));
        }
        result.children.push(child.duplicate());
        if let Some(incoming) = next.filter(|c| c.is_item()) {
            result.children.push(overlap_copy(incoming, |source| {
                TimeRange::new(source.start_time(), transition.out_offset())
            }));
        }
    }

    debug!(
        track = track.name(),
        children = result.children.len(),
        "expanded transitions"
    );
    Ok(result)
}

/// Duplicate `neighbor` with its source range replaced by `window(source)`.
/// A neighbor with no computable range is copied as is.
fn overlap_copy(neighbor: &Composable, window: impl FnOnce(TimeRange) -> TimeRange) -> Composable {
    let mut copy = neighbor.duplicate();
    if let Some(item) = copy.as_item_mut() {
        if let Ok(source) = item.trimmed_range() {
            item.set_source_range(Some(window(source)));
        }
    }
    copy
}
