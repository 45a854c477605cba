//! Arithmetic on [`MediaTime`].
//!
//! The binary operators take the later of the two epochs. The compound
//! assignments only touch value and base and leave the receiver's epoch as
//! it was, whatever the epoch of the right hand side.
//!
//! Every operation has a checked form returning [`TimeError::Overflow`]
//! rather than wrapping. The operator impls panic on overflow, like the ones
//! on `std::time::Duration`.

use std::convert::TryFrom;
use std::ops::{Add, AddAssign, MulAssign, Neg, Sub};

use crate::error::TimeError;
use crate::time::MediaTime;

fn narrow_value(value: i128) -> Result<i64, TimeError> {
    i64::try_from(value).map_err(|_| TimeError::Overflow)
}

fn narrow_base(base: i128) -> Result<i32, TimeError> {
    i32::try_from(base).map_err(|_| TimeError::Overflow)
}

/// Applies `op` to the two values over a common base. Equal bases are kept
/// as they are; otherwise the result is over `lhs.base * rhs.base`.
fn combine(
    lhs: &MediaTime,
    rhs: &MediaTime,
    op: fn(i128, i128) -> Option<i128>,
) -> Result<(i64, i32), TimeError> {
    if lhs.base() == rhs.base() {
        let value = op(lhs.value().into(), rhs.value().into())
            .ok_or(TimeError::Overflow)?;
        return Ok((narrow_value(value)?, lhs.base()));
    }

    let a = i128::from(lhs.value()) * i128::from(rhs.base());
    let b = i128::from(rhs.value()) * i128::from(lhs.base());
    let value = op(a, b).ok_or(TimeError::Overflow)?;
    let base = lhs.base().checked_mul(rhs.base()).ok_or(TimeError::Overflow)?;

    Ok((narrow_value(value)?, base))
}

fn product(factors: &[i128]) -> Result<i128, TimeError> {
    factors.iter().try_fold(1i128, |acc, factor| {
        acc.checked_mul(*factor).ok_or(TimeError::Overflow)
    })
}

impl MediaTime {
    /// `self + rhs`, in the later of the two epochs.
    pub fn checked_add(self, rhs: MediaTime) -> Result<MediaTime, TimeError> {
        let (value, base) = combine(&self, &rhs, i128::checked_add)?;
        Ok(MediaTime::from_parts(value, base, self.epoch().max(rhs.epoch())))
    }

    /// `self - rhs`, in the later of the two epochs.
    pub fn checked_sub(self, rhs: MediaTime) -> Result<MediaTime, TimeError> {
        let (value, base) = combine(&self, &rhs, i128::checked_sub)?;
        Ok(MediaTime::from_parts(value, base, self.epoch().max(rhs.epoch())))
    }

    pub fn checked_neg(self) -> Result<MediaTime, TimeError> {
        let value = self.value().checked_neg().ok_or(TimeError::Overflow)?;
        Ok(MediaTime::from_parts(value, self.base(), self.epoch()))
    }

    /// In-place `+=`. The epoch of `self` is kept.
    pub fn accumulate(&mut self, rhs: MediaTime) -> Result<(), TimeError> {
        let (value, base) = combine(self, &rhs, i128::checked_add)?;
        *self = MediaTime::from_parts(value, base, self.epoch());
        Ok(())
    }

    /// In-place `*=`. The epoch of `self` is kept.
    ///
    /// With equal bases the values and the bases are multiplied. With
    /// different bases both are taken over `(b1 * b2)^2`, i.e. the value
    /// becomes `v1 * b2 * v2 * b1` and the base `b1 * b2 * b1 * b2`.
    pub fn scale_in_place(&mut self, rhs: MediaTime) -> Result<(), TimeError> {
        let (v1, b1) = (i128::from(self.value()), i128::from(self.base()));
        let (v2, b2) = (i128::from(rhs.value()), i128::from(rhs.base()));

        let (value, base) = if b1 == b2 {
            (product(&[v1, v2])?, product(&[b1, b2])?)
        } else {
            (product(&[v1, b2, v2, b1])?, product(&[b1, b2, b1, b2])?)
        };

        *self = MediaTime::from_parts(narrow_value(value)?, narrow_base(base)?, self.epoch());
        Ok(())
    }
}

impl Add for MediaTime {
    type Output = MediaTime;

    fn add(self, rhs: MediaTime) -> MediaTime {
        self.checked_add(rhs).expect("overflow when adding media times")
    }
}

impl Sub for MediaTime {
    type Output = MediaTime;

    fn sub(self, rhs: MediaTime) -> MediaTime {
        self.checked_sub(rhs).expect("overflow when subtracting media times")
    }
}

impl Neg for MediaTime {
    type Output = MediaTime;

    fn neg(self) -> MediaTime {
        self.checked_neg().expect("overflow when negating media time")
    }
}

impl AddAssign for MediaTime {
    fn add_assign(&mut self, rhs: MediaTime) {
        self.accumulate(rhs).expect("overflow when adding media times")
    }
}

impl MulAssign for MediaTime {
    fn mul_assign(&mut self, rhs: MediaTime) {
        self.scale_in_place(rhs).expect("overflow when multiplying media times")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DEFAULT_TIME_BASE;

    fn mt(value: i64, base: i32, epoch: i64) -> MediaTime {
        MediaTime::new_with_epoch(value, base, epoch).unwrap()
    }

    fn parts(time: MediaTime) -> (i64, i32, i64) {
        (time.value(), time.base(), time.epoch())
    }

    #[test]
    fn add_same_base() {
        assert_eq!(parts(mt(3, 10, 0) + mt(4, 10, 0)), (7, 10, 0));
    }

    #[test]
    fn add_merges_bases() {
        assert_eq!(parts(mt(1, 2, 0) + mt(1, 3, 0)), (5, 6, 0));
    }

    #[test]
    fn sub_merges_bases() {
        assert_eq!(parts(mt(1, 2, 0) - mt(1, 3, 0)), (1, 6, 0));
        assert_eq!(parts(mt(1, 3, 0) - mt(1, 2, 0)), (-1, 6, 0));
    }

    #[test]
    fn binary_ops_take_later_epoch() {
        assert_eq!((mt(0, 1, 0) + mt(0, 1, 5)).epoch(), 5);
        assert_eq!((mt(0, 1, 5) + mt(0, 1, 0)).epoch(), 5);
        assert_eq!(parts(mt(5, 1, 2) - mt(1, 1, 7)), (4, 1, 7));
        assert_eq!((mt(1, 2, -3) - mt(1, 3, -8)).epoch(), -3);
    }

    #[test]
    fn accumulate_keeps_own_epoch() {
        let mut time = mt(1, 2, 2);
        time += mt(1, 3, 9);
        assert_eq!(parts(time), (5, 6, 2));

        time += mt(1, 6, -4);
        assert_eq!(parts(time), (6, 6, 2));
    }

    #[test]
    fn scale_same_base() {
        let mut time = mt(2, 3, 1);
        time *= mt(3, 3, 6);
        assert_eq!(parts(time), (6, 9, 1));
    }

    #[test]
    fn scale_mixed_bases() {
        let mut time = mt(1, 2, 4);
        time *= mt(3, 4, 0);
        assert_eq!(parts(time), (24, 64, 4));
        assert_eq!(time, mt(3, 8, 4));
    }

    #[test]
    fn negate() {
        assert_eq!(parts(-mt(3, 4, 2)), (-3, 4, 2));
        assert_eq!(mt(i64::MIN, 1, 0).checked_neg(), Err(TimeError::Overflow));
    }

    #[test]
    fn add_overflow_is_reported() {
        assert_eq!(mt(i64::MAX, 1, 0).checked_add(mt(1, 1, 0)), Err(TimeError::Overflow));
        assert_eq!(mt(i64::MIN, 1, 0).checked_sub(mt(1, 1, 0)), Err(TimeError::Overflow));
        assert_eq!(mt(1, i32::MAX, 0).checked_add(mt(1, 2, 0)), Err(TimeError::Overflow));
    }

    #[test]
    #[should_panic(expected = "overflow when adding media times")]
    fn add_operator_panics_on_overflow() {
        let _ = mt(i64::MAX, 1, 0) + mt(1, 1, 0);
    }

    #[test]
    fn failed_compound_ops_leave_receiver_untouched() {
        let mut time = mt(3, DEFAULT_TIME_BASE, 1);
        let rhs = mt(2, DEFAULT_TIME_BASE, 0);

        assert_eq!(time.scale_in_place(rhs), Err(TimeError::Overflow));
        assert_eq!(parts(time), (3, DEFAULT_TIME_BASE, 1));

        assert_eq!(time.accumulate(mt(1, 1_000, 0)), Err(TimeError::Overflow));
        assert_eq!(parts(time), (3, DEFAULT_TIME_BASE, 1));
    }
}
