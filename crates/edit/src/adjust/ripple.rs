use cl_common::{RationalTime, TimeRange};
use cl_timeline::Item;

use crate::error::{EditError, EditResult};

/// Move the item's in and out points independently, leaving neighbors alone.
///
/// Each point is clamped to the available range when one exists. If clamping
/// would cross the points, the moving point is kept one frame away from the
/// other.
pub fn ripple<I>(item: &mut I, delta_in: RationalTime, delta_out: RationalTime) -> EditResult<()>
where
    I: Item + ?Sized,
{
    if delta_in.value() == 0.0 && delta_out.value() == 0.0 {
        return Ok(());
    }

    let source = item.trimmed_range()?;
    let available = item.available_range().ok();

    let mut start = source.start_time();
    let mut end = source.end_time_exclusive();

    if delta_in.value() != 0.0 {
        let mut new_start = start + delta_in;
        if let Some(available) = available {
            new_start = new_start.max(available.start_time());
        }
        if new_start >= end {
            new_start = end - RationalTime::new(1.0, end.rate());
        }
        start = new_start;
    }

    if delta_out.value() != 0.0 {
        let mut new_end = end + delta_out;
        if let Some(available) = available {
            new_end = new_end.min(available.end_time_exclusive());
        }
        if new_end <= start {
            new_end = start + RationalTime::new(1.0, start.rate());
        }
        end = new_end;
    }

    let duration = end - start;
    if duration.is_zero_or_negative() {
        return Err(EditError::NegativeDuration {
            operation: "ripple",
        });
    }

    item.set_source_range(Some(TimeRange::new(start, duration)));
    tracing::debug!(
        operation = "ripple",
        item = %item.id(),
        start = %start,
        duration = %duration,
        "rippled item"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_timeline::Clip;

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn range(start: f64, duration: f64) -> TimeRange {
        TimeRange::new(rt(start), rt(duration))
    }

    fn make_clip() -> Clip {
        Clip::new("A", Some(range(10.0, 24.0))).with_available_range(range(0.0, 48.0))
    }

    #[test]
    fn ripple_moves_both_points() {
        let mut clip = make_clip();
        ripple(&mut clip, rt(2.0), rt(4.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(12.0, 26.0));
    }

    #[test]
    fn ripple_clamps_to_available() {
        let mut clip = make_clip();
        ripple(&mut clip, rt(-20.0), rt(30.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(0.0, 48.0));
    }

    #[test]
    fn ripple_keeps_one_frame_when_points_cross() {
        let mut clip = make_clip();
        ripple(&mut clip, rt(40.0), rt(0.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(33.0, 1.0));

        let mut clip = make_clip();
        ripple(&mut clip, rt(0.0), rt(-30.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(10.0, 1.0));
    }

    #[test]
    fn ripple_zero_is_noop() {
        let mut clip = make_clip();
        ripple(&mut clip, rt(0.0), rt(0.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(10.0, 24.0));
    }
}
