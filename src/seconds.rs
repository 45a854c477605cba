use std::convert::TryFrom;
use std::time::Duration;

use crate::error::TimeError;
use crate::time::{check_base, MediaTime, DEFAULT_TIME_BASE};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

impl MediaTime {
    /// Floating point seconds. Lossy, meant for display and interop rather
    /// than comparisons.
    pub fn to_seconds(&self) -> f64 {
        self.value() as f64 / f64::from(self.base())
    }

    /// Fractional seconds at [`DEFAULT_TIME_BASE`]. Sub-tick fractions are
    /// truncated toward zero.
    ///
    /// Out of range input saturates and NaN becomes zero, following `as`
    /// casts from `f64` to `i64`.
    pub fn from_seconds(seconds: f64) -> MediaTime {
        if !seconds.is_finite() {
            log::warn!("non-finite seconds value {} for media time", seconds);
        }

        let value = (seconds * f64::from(DEFAULT_TIME_BASE)) as i64;
        MediaTime::from_parts(value, DEFAULT_TIME_BASE, 0)
    }

    pub fn from_seconds_in_base(seconds: f64, base: i32) -> Result<MediaTime, TimeError> {
        let base = check_base(base.into())?;
        let scaled = seconds * f64::from(base);

        if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(TimeError::Overflow);
        }

        Ok(MediaTime::from_parts(scaled as i64, base, 0))
    }

    /// Whole seconds at [`DEFAULT_TIME_BASE`].
    pub fn from_secs(secs: i64) -> Result<MediaTime, TimeError> {
        let value = secs.checked_mul(DEFAULT_TIME_BASE.into())
            .ok_or(TimeError::Overflow)?;

        Ok(MediaTime::from_parts(value, DEFAULT_TIME_BASE, 0))
    }

    /// The time as a `Duration`, truncated to whole nanoseconds. `None` for
    /// negative times.
    pub fn to_duration(&self) -> Option<Duration> {
        if self.value() < 0 {
            return None;
        }

        let base = i64::from(self.base());
        let secs = self.value() / base;
        let nanos = i128::from(self.value() % base) * NANOS_PER_SECOND / i128::from(base);

        Some(Duration::new(secs as u64, nanos as u32))
    }
}

impl TryFrom<Duration> for MediaTime {
    type Error = TimeError;

    /// Converts at [`DEFAULT_TIME_BASE`], truncating to whole ticks.
    fn try_from(duration: Duration) -> Result<Self, TimeError> {
        let ticks = duration.as_nanos() * DEFAULT_TIME_BASE as u128 / NANOS_PER_SECOND as u128;
        let value = i64::try_from(ticks).map_err(|_| TimeError::Overflow)?;
        Ok(MediaTime::from_parts(value, DEFAULT_TIME_BASE, 0))
    }
}
