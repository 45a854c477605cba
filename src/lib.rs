//! Rational media time.
//!
//! A [`MediaTime`] is a point or duration on a media timeline, stored as an
//! integer fraction of seconds together with an epoch that keeps loops and
//! stream resets apart. Comparisons are exact across different bases and
//! arithmetic reports overflow instead of wrapping.
//!
//! ```
//! use mediatime::MediaTime;
//!
//! let half = MediaTime::new(1, 2).unwrap();
//! let third = MediaTime::new(1, 3).unwrap();
//! assert_eq!((half + third).to_string(), "5/6");
//! ```

mod display;
mod ops;
mod seconds;

pub mod error;
pub mod time;

pub use error::{ParseError, TimeError};
pub use time::{MediaTime, DEFAULT_TIME_BASE};
