//! Calendar date of an event as written in a thread title.
//!
//! Titles sometimes carry impossible dates (`31.02.`, a year typo like `2104`).
//! `EventDate` keeps the numbers exactly as read so the value can still be
//! reported; [`EventDate::to_naive`] and [`EventDate::is_plausible`] tell the
//! caller whether it names a real day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical `dd.mm.yyyy` text did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{0}' (expected dd.mm.yyyy)")]
pub struct InvalidDate(pub String);

/// Day, month and year of an event. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl EventDate {
    /// No event threads predate this year.
    pub const FIRST_YEAR: i32 = 2012;

    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { year, month, day }
    }

    /// The real calendar day, if there is one.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Day and month in range and year between [`Self::FIRST_YEAR`] and `current_year`.
    pub fn is_plausible(&self, current_year: i32) -> bool {
        (1..=31).contains(&self.day)
            && (1..=12).contains(&self.month)
            && (Self::FIRST_YEAR..=current_year).contains(&self.year)
    }
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month(), day: date.day() }
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for EventDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = regex!(r"^(\d{2})\.(\d{2})\.(\d{4})$").captures(s.trim()).ok_or_else(|| InvalidDate(s.to_string()))?;
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        match (num(1), num(2), num(3)) {
            (Some(day), Some(month), Some(year)) => Ok(Self::new(day, month, year as i32)),
            _ => Err(InvalidDate(s.to_string())),
        }
    }
}

impl TryFrom<String> for EventDate {
    type Error = InvalidDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventDate> for String {
    fn from(date: EventDate) -> Self {
        date.to_string()
    }
}
