//! Rewrites that read a tree and build a new one.
//!
//! None of these touch their input; every node in the output is a duplicate
//! with its own id, so the results may be edited freely.

mod filter;
mod flatten;
mod timeline;
mod track;

pub use filter::{
    filtered_composition, filtered_with_sequence_context, keep_filter, name_filter,
    prune_filter, type_filter,
};
pub use flatten::{flatten_stack, flatten_tracks, top_clip_at_time};
pub use timeline::{
    flatten_timeline_video_tracks, timeline_audio_tracks, timeline_trimmed_to_range,
    timeline_video_tracks,
};
pub use track::{track_trimmed_to_range, track_with_expanded_transitions};

use cl_common::TimeRange;
use cl_timeline::Composable;

use crate::error::EditResult;

/// Duplicate `child`, which covers `original` in its parent, and point its
/// source range at the part that lands on `target`.
pub(crate) fn resourced(
    child: &Composable,
    original: &TimeRange,
    target: &TimeRange,
) -> EditResult<Composable> {
    let mut copy = child.duplicate();
    if let Some(item) = copy.as_item_mut() {
        let source = item.trimmed_range()?;
        let offset = (target.start_time() - original.start_time())
            .rescaled_to(source.start_time().rate());
        let duration = target.duration().rescaled_to(source.duration().rate());
        item.set_source_range(Some(TimeRange::new(source.start_time() + offset, duration)));
    }
    Ok(copy)
}
