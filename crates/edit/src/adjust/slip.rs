use cl_common::{RationalTime, TimeRange};
use cl_timeline::Item;

use crate::error::EditResult;

/// Move the item's window through its source media by `delta`.
///
/// Position and duration in the composition do not change. With an available
/// range the window is kept inside it by moving the start, never the duration.
pub fn slip<I>(item: &mut I, delta: RationalTime) -> EditResult<()>
where
    I: Item + ?Sized,
{
    if delta.value() == 0.0 {
        return Ok(());
    }

    let source = item.trimmed_range()?;
    let duration = source.duration();
    let mut start = source.start_time() + delta;

    if let Ok(available) = item.available_range() {
        let avail_start = available.start_time();
        let avail_end = available.end_time_exclusive();

        start = start.max(avail_start);
        if start + duration > avail_end {
            start = (avail_end - duration).max(avail_start);
        }
    }

    item.set_source_range(Some(TimeRange::new(start, duration)));
    tracing::debug!(
        operation = "slip",
        item = %item.id(),
        requested = %delta,
        start = %start,
        "slipped item"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_timeline::{Clip, Gap};

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn range(start: f64, duration: f64) -> TimeRange {
        TimeRange::new(rt(start), rt(duration))
    }

    #[test]
    fn slip_moves_start_keeps_duration() {
        let mut clip = Clip::new("A", Some(range(0.0, 48.0))).with_available_range(range(0.0, 100.0));
        slip(&mut clip, rt(10.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(10.0, 48.0));
    }

    #[test]
    fn slip_clamps_to_available_end() {
        let mut clip = Clip::new("A", Some(range(40.0, 48.0))).with_available_range(range(0.0, 100.0));
        slip(&mut clip, rt(30.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(52.0, 48.0));
    }

    #[test]
    fn slip_clamps_to_available_start() {
        let mut clip = Clip::new("A", Some(range(10.0, 48.0))).with_available_range(range(5.0, 100.0));
        slip(&mut clip, rt(-30.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(5.0, 48.0));
    }

    #[test]
    fn slip_without_available_range_is_unbounded() {
        let mut clip = Clip::new("A", Some(range(10.0, 24.0)));
        slip(&mut clip, rt(-30.0)).unwrap();
        assert_eq!(clip.source_range().unwrap(), range(-20.0, 24.0));
    }

    #[test]
    fn slip_zero_is_noop() {
        let mut gap = Gap::new("hole", None);
        slip(&mut gap, rt(0.0)).unwrap();
        assert!(gap.source_range().is_none());
    }

    #[test]
    fn slip_needs_some_range() {
        let mut gap = Gap::new("hole", None);
        assert!(slip(&mut gap, rt(1.0)).is_err());
    }
}
