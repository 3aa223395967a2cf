use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<hour>\d{1,2}):(?P<minute>\d{2})$").unwrap());

/// A 24-hour wall clock value, written as `HH:MM`. Serialized in the same
/// form and range-checked when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Where pickers start when nothing better is known.
    pub const DEFAULT_START: ClockTime = ClockTime { hour: 9, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Clock time of an existing timestamp, seconds dropped.
    pub fn of(dt: NaiveDateTime) -> Self {
        Self {
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, PlannerError> {
        let invalid = || PlannerError::InvalidTime(s.to_string());
        let caps = CLOCK_RE.captures(s.trim()).ok_or_else(invalid)?;
        let hour: u32 = caps["hour"].parse().map_err(|_| invalid())?;
        let minute: u32 = caps["minute"].parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }

    /// The same minute, `hours` later, wrapping past midnight.
    pub fn plus_hours(&self, hours: u32) -> Self {
        Self {
            hour: (self.hour + hours) % 24,
            minute: self.minute,
        }
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        // hour/minute are range-checked on construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Place this clock time on `date`.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.as_naive_time())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// True when both values fall on the same year, month and day-of-month.
/// Time of day is ignored and no timezone conversion happens.
pub fn same_calendar_day(a: &impl Datelike, b: &impl Datelike) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}
