//! Compositing layered tracks into one, and the top-clip query over a stack.

use cl_common::{RationalTime, TimeRange, DEFAULT_EPSILON};
use cl_timeline::{Clip, Composable, Composition, Item, Stack, Track, TrackKind};
use tracing::debug;

use super::resourced;
use crate::error::EditResult;
use crate::range::subtract_range;

const FLATTENED: &str = "Flattened";

/// Flatten the tracks of `stack`, bottom first. Non-track children are ignored.
pub fn flatten_stack(stack: &Stack) -> EditResult<Track> {
    let tracks: Vec<&Track> = stack
        .children
        .iter()
        .filter_map(Composable::as_track)
        .collect();
    flatten_tracks(&tracks)
}

/// Collapse `tracks` into one track named "Flattened"; later tracks win.
///
/// Each track is composited onto the result so far: base material under a
/// top track's enabled items is cut away and those items are appended after
/// what survives. Gaps on a top track never cover anything, and no filler is
/// added for time that no track covers.
pub fn flatten_tracks(tracks: &[&Track]) -> EditResult<Track> {
    let Some((first, rest)) = tracks.split_first() else {
        return Ok(Track::new(FLATTENED, TrackKind::Video));
    };

    let mut result = first.duplicate();
    for top in rest {
        result = composite_on_top(&result, top)?;
    }
    result.base.name = FLATTENED.to_string();

    debug!(
        tracks = tracks.len(),
        children = result.children.len(),
        "flattened tracks"
    );
    Ok(result)
}

fn composite_on_top(base: &Track, top: &Track) -> EditResult<Track> {
    let covering: Vec<(TimeRange, &Composable)> = top
        .children
        .iter()
        .zip(top.child_ranges())
        .filter_map(|(child, range)| {
            let range = range?;
            let item = child.as_item()?;
            (item.enabled() && child.as_gap().is_none()).then_some((range, child))
        })
        .collect();

    let mut result = Track::new(base.name(), base.kind);
    result.set_source_range(base.source_range());

    for (child, range) in base.children.iter().zip(base.child_ranges()) {
        let Some(range) = range else {
            continue;
        };

        // A transition is kept whole or not at all.
        if child.as_transition().is_some() {
            let untouched = covering
                .iter()
                .all(|(top_range, _)| !range.intersects(top_range, DEFAULT_EPSILON));
            if untouched {
                result.children.push(child.duplicate());
            }
            continue;
        }

        let mut pieces = vec![range];
        for (top_range, _) in &covering {
            pieces = pieces
                .iter()
                .flat_map(|piece| subtract_range(piece, top_range))
                .collect();
        }
        for piece in pieces.iter().filter(|p| p.duration().is_positive()) {
            result.children.push(resourced(child, &range, piece)?);
        }
    }

    // Top items follow the surviving base pieces, in their own order.
    result
        .children
        .extend(covering.iter().map(|(_, child)| child.duplicate()));
    Ok(result)
}

/// The topmost enabled clip at `time`, searching tracks from the last down.
///
/// Stacks nested inside a track are searched in their own time, measured from
/// where they start on the track.
pub fn top_clip_at_time(stack: &Stack, time: RationalTime) -> Option<&Clip> {
    stack
        .children
        .iter()
        .rev()
        .filter_map(Composable::as_track)
        .find_map(|track| clip_at_time_in_track(track, time).filter(|clip| clip.enabled()))
}

fn clip_at_time_in_track(track: &Track, time: RationalTime) -> Option<&Clip> {
    for (child, range) in track.children.iter().zip(track.child_ranges()) {
        let Some(range) = range else {
            continue;
        };
        if !range.contains(time) {
            continue;
        }
        match child {
            Composable::Clip(clip) => return Some(clip),
            Composable::Stack(nested) => {
                return top_clip_at_time(nested, time - range.start_time());
            }
            _ => {}
        }
    }
    None
}
