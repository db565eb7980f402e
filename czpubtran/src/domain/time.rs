//! Time and date values exchanged with the CRWS API.
//!
//! The API speaks local Czech time as plain strings: departure filters and
//! leg times are "HH:MM", timetable validity dates are "DD.MM.YYYY".

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid time or date string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct InvalidTime {
    reason: &'static str,
}

impl InvalidTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A departure time filter in "HH:MM" format.
///
/// # Examples
///
/// ```
/// use czpubtran::DepartureTime;
///
/// let time = DepartureTime::parse_hhmm("07:45").unwrap();
/// assert_eq!(time.to_string(), "07:45");
///
/// assert!(DepartureTime::parse_hhmm("7:45").is_err());
/// assert!(DepartureTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Create a departure time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from strict "HH:MM" format.
    ///
    /// Both fields must be zero-padded to two digits.
    pub fn parse_hhmm(s: &str) -> Result<Self, InvalidTime> {
        let padded = s.len() == 5
            && s.bytes()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !padded {
            return Err(InvalidTime::new("expected HH:MM format"));
        }

        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| InvalidTime::new("expected a time between 00:00 and 23:59"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the underlying chrono time.
    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for DepartureTime {
    type Err = InvalidTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({self})")
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a timetable validity date in "DD.MM.YYYY" format.
///
/// # Examples
///
/// ```
/// use czpubtran::domain::parse_validity_date;
/// use chrono::NaiveDate;
///
/// let date = parse_validity_date("31.12.2099").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2099, 12, 31).unwrap());
/// ```
pub fn parse_validity_date(s: &str) -> Result<NaiveDate, InvalidTime> {
    NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y")
        .map_err(|_| InvalidTime::new("expected DD.MM.YYYY date"))
}
