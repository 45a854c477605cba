use std::error::Error;
use std::num::ParseIntError;

use derive_more::{Display, From};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// Bases are ticks per second and must be strictly positive. Also
    /// raised for denominators which cannot be represented as an `i32`.
    #[display(fmt = "invalid time base: {}", _0)]
    InvalidBase(i64),
    #[display(fmt = "media time arithmetic overflowed")]
    Overflow,
}

impl Error for TimeError {}

#[derive(From, Debug, Display, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[display(fmt = "expected <value>/<base>")]
    MissingSeparator,
    #[display(fmt = "malformed epoch suffix")]
    MalformedEpoch,
    #[display(fmt = "bad integer: {}", _0)]
    Int(ParseIntError),
    #[display(fmt = "{}", _0)]
    Time(TimeError),
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Int(e) => Some(e),
            ParseError::Time(e) => Some(e),
            _ => None,
        }
    }
}
