//! Whole-timeline variants of the track rewrites.

use cl_common::TimeRange;
use cl_timeline::{Composable, Item, Stack, Timeline, Track, TrackKind};
use tracing::debug;

use super::{flatten_tracks, track_trimmed_to_range};
use crate::error::EditResult;

/// An empty timeline carrying `timeline`'s name, start time and track stack
/// settings.
fn empty_like(timeline: &Timeline) -> Timeline {
    let mut tracks = Stack::new(timeline.tracks.name());
    tracks.set_source_range(timeline.tracks.source_range());
    Timeline {
        name: timeline.name.clone(),
        global_start_time: timeline.global_start_time,
        tracks,
    }
}

/// Every track of `timeline` trimmed to `range`; other children are copied.
pub fn timeline_trimmed_to_range(timeline: &Timeline, range: TimeRange) -> EditResult<Timeline> {
    let mut result = empty_like(timeline);
    for child in &timeline.tracks.children {
        let trimmed = match child {
            Composable::Track(track) => track_trimmed_to_range(track, range)?.into(),
            other => other.duplicate(),
        };
        result.tracks.children.push(trimmed);
    }
    Ok(result)
}

pub fn timeline_video_tracks(timeline: &Timeline) -> Vec<&Track> {
    timeline.video_tracks()
}

pub fn timeline_audio_tracks(timeline: &Timeline) -> Vec<&Track> {
    timeline.audio_tracks()
}

/// A copy of `timeline` with its video tracks flattened into one.
///
/// The flattened track comes first, then the audio tracks, then any other
/// children, each in their original order.
pub fn flatten_timeline_video_tracks(timeline: &Timeline) -> EditResult<Timeline> {
    let video = timeline.video_tracks();
    let mut result = empty_like(timeline);

    if !video.is_empty() {
        let mut flattened = flatten_tracks(&video)?;
        flattened.kind = TrackKind::Video;
        result.tracks.children.push(flattened.into());
    }

    result.tracks.children.extend(
        timeline
            .audio_tracks()
            .into_iter()
            .map(|track| Composable::from(track.duplicate())),
    );
    result.tracks.children.extend(
        timeline
            .tracks
            .children
            .iter()
            .filter(|child| child.as_track().is_none())
            .map(Composable::duplicate),
    );

    debug!(
        timeline = %timeline.name,
        video_tracks = video.len(),
        "flattened timeline video"
    );
    Ok(result)
}
