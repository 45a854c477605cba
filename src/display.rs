use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ParseError;
use crate::time::MediaTime;

/// `<value>/<base>`, followed by `[<epoch>]` outside of epoch zero.
impl Display for MediaTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.value(), self.base())?;

        if self.epoch() != 0 {
            write!(f, "[{}]", self.epoch())?;
        }

        Ok(())
    }
}

impl FromStr for MediaTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let (time, epoch) = match s.find('[') {
            Some(open) => {
                let epoch = s[open + 1..].strip_suffix(']')
                    .ok_or(ParseError::MalformedEpoch)?;
                (&s[..open], epoch.parse()?)
            }
            None => (s, 0),
        };

        let (value, base) = time.split_once('/')
            .ok_or(ParseError::MissingSeparator)?;

        Ok(MediaTime::new_with_epoch(value.parse()?, base.parse()?, epoch)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;

    #[test]
    fn renders_without_epoch() {
        assert_eq!(MediaTime::new(1, 2).unwrap().to_string(), "1/2");
        assert_eq!(MediaTime::default().to_string(), "0/1");
        assert_eq!(MediaTime::new(-7, 30).unwrap().to_string(), "-7/30");
    }

    #[test]
    fn renders_epoch_suffix() {
        assert_eq!(MediaTime::new_with_epoch(1, 2, 3).unwrap().to_string(), "1/2[3]");
        assert_eq!(MediaTime::new_with_epoch(1, 2, -1).unwrap().to_string(), "1/2[-1]");
    }

    #[test]
    fn parses_rendered_form() {
        for text in &["1/2", "1/2[3]", "-15000000/10000000[-2]", "0/1"] {
            let time: MediaTime = text.parse().unwrap();
            assert_eq!(time.to_string(), *text);
        }
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("12".parse::<MediaTime>(), Err(ParseError::MissingSeparator));
        assert_eq!("1/2[3".parse::<MediaTime>(), Err(ParseError::MalformedEpoch));
        assert_eq!("1/2[3]x".parse::<MediaTime>(), Err(ParseError::MalformedEpoch));
        assert!(matches!("a/2".parse::<MediaTime>(), Err(ParseError::Int(_))));
        assert!(matches!("1/2[]".parse::<MediaTime>(), Err(ParseError::Int(_))));
        assert_eq!(
            "1/0".parse::<MediaTime>(),
            Err(ParseError::Time(TimeError::InvalidBase(0))),
        );
    }
}
