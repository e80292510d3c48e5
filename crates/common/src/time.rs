//! Rational time and time ranges.
//!
//! A `RationalTime` is a `value` counted at `rate` units per second, so
//! `RationalTime::new(48.0, 24.0)` is two seconds. Arithmetic between times of
//! different rates rescales to the higher rate before combining, which keeps
//! frame-accurate values exact for the common integer frame rates.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Tolerance (in seconds) used when testing whether two ranges touch or overlap.
///
/// Twice the sample period of 192kHz audio, the finest rate in common use.
pub const DEFAULT_EPSILON: f64 = 1.0 / (2.0 * 192_000.0);

/// A point in time (or a duration) expressed as `value / rate` seconds.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct RationalTime {
    value: f64,
    rate: f64,
}

impl RationalTime {
    pub const ZERO: Self = Self {
        value: 0.0,
        rate: 1.0,
    };

    pub const fn new(value: f64, rate: f64) -> Self {
        Self { value, rate }
    }

    /// Zero at the given rate.
    pub const fn zero(rate: f64) -> Self {
        Self { value: 0.0, rate }
    }

    pub fn from_seconds(seconds: f64, rate: f64) -> Self {
        Self {
            value: seconds * rate,
            rate,
        }
    }

    /// Numerator at the native rate.
    pub fn value(self) -> f64 {
        self.value
    }

    pub fn rate(self) -> f64 {
        self.rate
    }

    pub fn to_seconds(self) -> f64 {
        self.value / self.rate
    }

    /// A time is valid when neither field is NaN and the rate is positive.
    pub fn is_valid(self) -> bool {
        !self.value.is_nan() && !self.rate.is_nan() && self.rate > 0.0
    }

    pub fn value_rescaled_to(self, new_rate: f64) -> f64 {
        if new_rate == self.rate {
            self.value
        } else {
            (self.value * new_rate) / self.rate
        }
    }

    pub fn rescaled_to(self, new_rate: f64) -> Self {
        Self {
            value: self.value_rescaled_to(new_rate),
            rate: new_rate,
        }
    }

    /// `true` when the value is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.value > 0.0
    }

    /// `true` when the value is zero or negative.
    pub fn is_zero_or_negative(self) -> bool {
        self.value <= 0.0
    }

    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for RationalTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // A rate-less operand carries no time information.
        if self.rate <= 0.0 {
            return rhs;
        }
        if rhs.rate <= 0.0 {
            return self;
        }
        if self.rate < rhs.rate {
            Self {
                value: self.value_rescaled_to(rhs.rate) + rhs.value,
                rate: rhs.rate,
            }
        } else {
            Self {
                value: self.value + rhs.value_rescaled_to(self.rate),
                rate: self.rate,
            }
        }
    }
}

impl Sub for RationalTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.rate < rhs.rate {
            Self {
                value: self.value_rescaled_to(rhs.rate) - rhs.value,
                rate: rhs.rate,
            }
        } else {
            Self {
                value: self.value - rhs.value_rescaled_to(self.rate),
                rate: self.rate,
            }
        }
    }
}

impl Neg for RationalTime {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            value: -self.value,
            rate: self.rate,
        }
    }
}

impl PartialEq for RationalTime {
    fn eq(&self, other: &Self) -> bool {
        self.value_rescaled_to(other.rate) == other.value
    }
}

impl PartialOrd for RationalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_seconds().partial_cmp(&other.to_seconds())
    }
}

impl fmt::Display for RationalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.rate)
    }
}

/// A half-open span of time: `[start_time, start_time + duration)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    start_time: RationalTime,
    duration: RationalTime,
}

impl TimeRange {
    pub const fn new(start_time: RationalTime, duration: RationalTime) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// Build a range from an inclusive start and an exclusive end.
    ///
    /// The duration is expressed at the start time's rate.
    pub fn from_start_end_time(start_time: RationalTime, end_time_exclusive: RationalTime) -> Self {
        let duration = RationalTime::new(
            end_time_exclusive.value_rescaled_to(start_time.rate) - start_time.value,
            start_time.rate,
        );
        Self {
            start_time,
            duration,
        }
    }

    pub fn start_time(&self) -> RationalTime {
        self.start_time
    }

    pub fn duration(&self) -> RationalTime {
        self.duration
    }

    /// First time after the range, at the duration's rate.
    pub fn end_time_exclusive(&self) -> RationalTime {
        self.duration + self.start_time.rescaled_to(self.duration.rate)
    }

    /// `start <= time < end`.
    pub fn contains(&self, time: RationalTime) -> bool {
        self.start_time <= time && time < self.end_time_exclusive()
    }

    /// Whether the two ranges share more than `epsilon` seconds of time.
    ///
    /// Ranges whose boundaries merely touch (within `epsilon`) do not intersect.
    pub fn intersects(&self, other: &TimeRange, epsilon: f64) -> bool {
        let this_start = self.start_time.to_seconds();
        let this_end = self.end_time_exclusive().to_seconds();
        let other_start = other.start_time.to_seconds();
        let other_end = other.end_time_exclusive().to_seconds();

        other_end - this_start >= epsilon && this_end - other_start >= epsilon
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, +{})", self.start_time, self.duration)
    }
}
