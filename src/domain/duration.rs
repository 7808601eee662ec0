//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default one-shot recording duration (10 seconds)
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// Value object representing a recording duration.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default one-shot recording duration (10 seconds)
    pub const fn default_duration() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string: "10s", "1m", "2m30s", "90s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || DurationParseError {
            input: s.to_string(),
        };

        let mut total_secs: u64 = 0;
        let mut digits = String::new();
        let mut seen_unit = false;

        for ch in input.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                'm' if !digits.is_empty() => {
                    let minutes: u64 = digits.parse().map_err(|_| err())?;
                    total_secs += minutes * 60;
                    digits.clear();
                    seen_unit = true;
                }
                's' if !digits.is_empty() => {
                    let seconds: u64 = digits.parse().map_err(|_| err())?;
                    total_secs += seconds;
                    digits.clear();
                    seen_unit = true;
                }
                _ => return Err(err()),
            }
        }

        // Trailing digits without a unit, or nothing parsed at all
        if !digits.is_empty() || !seen_unit || total_secs == 0 {
            return Err(err());
        }

        Ok(Self::from_secs(total_secs))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.as_secs();
        if secs >= 60 && secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else if secs >= 60 {
            write!(f, "{}m{}s", secs / 60, secs % 60)
        } else {
            write!(f, "{}s", secs)
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds() {
        let d: Duration = "30s".parse().unwrap();
        assert_eq!(d.as_secs(), 30);
    }

    #[test]
    fn parse_minutes() {
        let d: Duration = "2m".parse().unwrap();
        assert_eq!(d.as_secs(), 120);
    }

    #[test]
    fn parse_minutes_and_seconds() {
        let d: Duration = "2m30s".parse().unwrap();
        assert_eq!(d.as_secs(), 150);
    }

    #[test]
    fn parse_trims_and_lowercases() {
        let d: Duration = " 45S ".parse().unwrap();
        assert_eq!(d.as_secs(), 45);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Duration>().is_err());
        assert!("abc".parse::<Duration>().is_err());
        assert!("10".parse::<Duration>().is_err());
        assert!("s30".parse::<Duration>().is_err());
        assert!("0s".parse::<Duration>().is_err());
    }

    #[test]
    fn display_round_trips() {
        assert_eq!("30s".parse::<Duration>().unwrap().to_string(), "30s");
        assert_eq!("2m".parse::<Duration>().unwrap().to_string(), "2m");
        assert_eq!("90s".parse::<Duration>().unwrap().to_string(), "1m30s");
    }

    #[test]
    fn millis_conversion() {
        let d = Duration::from_secs(3);
        assert_eq!(d.as_millis(), 3000);
        assert_eq!(d.as_std(), StdDuration::from_secs(3));
    }
}
