//! Month periods used as pivot columns

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use super::error::FilterError;

/// A calendar month in `YYYY-MM` form.
///
/// Hierarchy queries splice periods into SQL text as column selectors, so
/// this type only ever holds four digits, a dash, and a month 01-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Parse a strict `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidPeriod(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    pub const MIN: Period = Period { year: 0, month: 1 };
    pub const MAX: Period = Period { year: 9999, month: 12 };

    /// The month containing `date`, or `None` outside years 0000-9999
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        if !(Self::MIN.year..=Self::MAX.year).contains(&date.year()) {
            return None;
        }
        Some(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // year has four digits and month is 1-12, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month, `None` after [`Period::MAX`]
    pub fn next(&self) -> Option<Self> {
        match (self.year, self.month) {
            (9999, 12) => None,
            (year, 12) => Some(Self { year: year + 1, month: 1 }),
            (year, month) => Some(Self { year, month: month + 1 }),
        }
    }

    /// Every month from `start`'s month to `end`'s month, inclusive.
    /// The range is clamped to [`Period::MIN`]..=[`Period::MAX`].
    pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<Period> {
        let clamp = |date: NaiveDate| {
            Period::from_date(date).unwrap_or(if date.year() < 0 { Period::MIN } else { Period::MAX })
        };
        if start.year() > Self::MAX.year || end.year() < Self::MIN.year {
            return Vec::new();
        }
        let last = clamp(end);
        let mut next = Some(clamp(start));
        let mut out = Vec::new();
        while let Some(current) = next.filter(|p| *p <= last) {
            out.push(current);
            next = current.next();
        }
        out
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Period::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
