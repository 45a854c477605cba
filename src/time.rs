use std::cmp::Ordering;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

use num_rational::{Ratio, Rational64};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Ticks per second used by the seconds constructors. Gives 100ns
/// resolution while leaving an `i64` value room for tens of thousands of
/// years.
pub const DEFAULT_TIME_BASE: i32 = 10_000_000;

/// A point or duration on a media timeline, stored as the fraction
/// `value / base` seconds.
///
/// The `epoch` partitions a timeline that is otherwise discontinuous, for
/// example the iterations of a looping clip or a stream that has been reset.
/// Times are ordered by epoch first and only then by their value, so any time
/// in epoch 1 is later than every time in epoch 0.
///
/// The base is always strictly positive. Every path that introduces a base
/// checks it and reports [`TimeError::InvalidBase`] otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawMediaTime")]
pub struct MediaTime {
    value: i64,
    base: i32,
    epoch: i64,
}

#[derive(Deserialize)]
struct RawMediaTime {
    value: i64,
    base: i32,
    #[serde(default)]
    epoch: i64,
}

impl TryFrom<RawMediaTime> for MediaTime {
    type Error = TimeError;

    fn try_from(raw: RawMediaTime) -> Result<Self, TimeError> {
        MediaTime::new_with_epoch(raw.value, raw.base, raw.epoch)
    }
}

pub(crate) fn check_base(base: i64) -> Result<i32, TimeError> {
    i32::try_from(base)
        .ok()
        .filter(|base| *base > 0)
        .ok_or(TimeError::InvalidBase(base))
}

/// `value * to / from`, truncated toward zero. Also reports whether the
/// division discarded a remainder.
fn scale_value(value: i64, from: i32, to: i32) -> Result<(i64, bool), TimeError> {
    let scaled = i128::from(value) * i128::from(to);
    let from = i128::from(from);
    let truncated = scaled % from != 0;

    let value = i64::try_from(scaled / from)
        .map_err(|_| TimeError::Overflow)?;

    Ok((value, truncated))
}

impl MediaTime {
    pub const ZERO: MediaTime = MediaTime { value: 0, base: 1, epoch: 0 };

    pub fn new(value: i64, base: i32) -> Result<Self, TimeError> {
        MediaTime::new_with_epoch(value, base, 0)
    }

    pub fn new_with_epoch(value: i64, base: i32, epoch: i64) -> Result<Self, TimeError> {
        let base = check_base(base.into())?;
        Ok(MediaTime { value, base, epoch })
    }

    /// Callers must have validated `base` already.
    pub(crate) const fn from_parts(value: i64, base: i32, epoch: i64) -> Self {
        MediaTime { value, base, epoch }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    pub fn set_epoch(&mut self, epoch: i64) {
        self.epoch = epoch;
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Changes the base to `new_base`, scaling the value to match.
    ///
    /// This is subject to rounding: the scaled value is truncated toward
    /// zero, so rescaling to a coarser base and back does not in general
    /// reproduce the original value. Leaves `self` untouched on error.
    pub fn rescale(&mut self, new_base: i32) -> Result<(), TimeError> {
        let new_base = check_base(new_base.into())?;

        if new_base == self.base {
            return Ok(());
        }

        let (value, truncated) = scale_value(self.value, self.base, new_base)?;

        if truncated {
            log::trace!("rescaling {} to base {} truncated to {}", self, new_base, value);
        }

        self.value = value;
        self.base = new_base;
        Ok(())
    }

    pub fn rescaled(mut self, new_base: i32) -> Result<Self, TimeError> {
        self.rescale(new_base)?;
        Ok(self)
    }

    /// The value this time would have in `other_base`, with the same
    /// truncation as [`rescale`](MediaTime::rescale).
    pub fn value_in_base(&self, other_base: i32) -> Result<i64, TimeError> {
        let other_base = check_base(other_base.into())?;

        if other_base == self.base {
            return Ok(self.value);
        }

        scale_value(self.value, self.base, other_base).map(|(value, _)| value)
    }

    /// Epoch first, then the exact rational value. Cross-base comparisons
    /// multiply out in `i128` and cannot overflow.
    pub fn compare_to(&self, other: &MediaTime) -> Ordering {
        self.epoch.cmp(&other.epoch).then_with(|| {
            if self.base == other.base {
                self.value.cmp(&other.value)
            } else {
                let lhs = i128::from(self.value) * i128::from(other.base);
                let rhs = i128::from(other.value) * i128::from(self.base);
                lhs.cmp(&rhs)
            }
        })
    }

    /// The time as a reduced rational number of seconds. The epoch is not
    /// carried over.
    pub fn to_rational(&self) -> Rational64 {
        Rational64::new(self.value, self.base.into())
    }

    pub fn from_rational(ratio: Rational64, epoch: i64) -> Result<Self, TimeError> {
        let base = check_base(*ratio.denom())?;
        Ok(MediaTime::from_parts(*ratio.numer(), base, epoch))
    }
}

impl Default for MediaTime {
    fn default() -> Self {
        MediaTime::ZERO
    }
}

impl PartialEq for MediaTime {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for MediaTime {}

impl PartialOrd for MediaTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl Ord for MediaTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for MediaTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // equal times in different bases reduce to the same fraction
        let reduced = Ratio::<i128>::new(self.value.into(), self.base.into());
        self.epoch.hash(state);
        reduced.numer().hash(state);
        reduced.denom().hash(state);
    }
}
