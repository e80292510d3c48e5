//! Interval arithmetic on `TimeRange`.

use cl_common::{TimeRange, DEFAULT_EPSILON};

/// The overlap of `a` and `b`: latest start to earliest end.
///
/// Callers check `intersects` first; disjoint inputs yield a negative duration.
pub fn intersect_ranges(a: &TimeRange, b: &TimeRange) -> TimeRange {
    let start = a.start_time().max(b.start_time());
    let end = a.end_time_exclusive().min(b.end_time_exclusive());
    TimeRange::from_start_end_time(start, end)
}

/// What is left of `a` once `b` is taken out: zero, one or two pieces, in order.
pub fn subtract_range(a: &TimeRange, b: &TimeRange) -> Vec<TimeRange> {
    if !a.intersects(b, DEFAULT_EPSILON) {
        return vec![*a];
    }

    let mut pieces = Vec::with_capacity(2);

    if a.start_time() < b.start_time() {
        let before_end = b.start_time().min(a.end_time_exclusive());
        let before = TimeRange::from_start_end_time(a.start_time(), before_end);
        if before.duration().is_positive() {
            pieces.push(before);
        }
    }

    if a.end_time_exclusive() > b.end_time_exclusive() {
        let after_start = b.end_time_exclusive().max(a.start_time());
        let after = TimeRange::from_start_end_time(after_start, a.end_time_exclusive());
        if after.duration().is_positive() {
            pieces.push(after);
        }
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_common::RationalTime;

    fn range(start: f64, duration: f64) -> TimeRange {
        TimeRange::new(RationalTime::new(start, 24.0), RationalTime::new(duration, 24.0))
    }

    #[test]
    fn intersection_of_overlapping_ranges() {
        let r = intersect_ranges(&range(0.0, 48.0), &range(24.0, 48.0));
        assert_eq!(r, range(24.0, 24.0));
    }

    #[test]
    fn subtract_disjoint_keeps_whole() {
        assert_eq!(subtract_range(&range(0.0, 24.0), &range(24.0, 24.0)), vec![range(0.0, 24.0)]);
    }

    #[test]
    fn subtract_middle_leaves_two_pieces() {
        let pieces = subtract_range(&range(0.0, 48.0), &range(12.0, 12.0));
        assert_eq!(pieces, vec![range(0.0, 12.0), range(24.0, 24.0)]);
    }

    #[test]
    fn subtract_covering_leaves_nothing() {
        assert!(subtract_range(&range(12.0, 12.0), &range(0.0, 48.0)).is_empty());
    }

    #[test]
    fn subtract_tail() {
        let pieces = subtract_range(&range(0.0, 48.0), &range(24.0, 48.0));
        assert_eq!(pieces, vec![range(0.0, 24.0)]);
    }
}
