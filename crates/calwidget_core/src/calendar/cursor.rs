//! Date cursor: the month/year currently displayed.
//!
//! # Invariants
//! - `month` is always in `1..=12`.
//! - `year` stays inside the range where the whole month (and the first of
//!   the following month) is representable as a `NaiveDate`.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Smallest year a cursor may point at.
pub const MIN_YEAR: i32 = -9999;
/// Largest year a cursor may point at.
pub const MAX_YEAR: i32 = 9999;

/// Displayed month, normalized to its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateCursor {
    year: i32,
    month: u32,
}

impl DateCursor {
    /// Creates a cursor, returning `None` for an invalid month or a year
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Cursor for the month containing `date`.
    ///
    /// Dates outside the supported year range are clamped to its edge.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the displayed month.
    pub fn first_day(&self) -> NaiveDate {
        first_of_month(self.year, self.month)
    }

    /// Returns the cursor moved by `delta` months, carrying into the year.
    ///
    /// Returns `None` when the result leaves the supported year range.
    pub fn shifted(&self, delta: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(delta);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }

    /// Moves the cursor by `delta` months.
    ///
    /// Returns `false` and leaves the cursor unchanged when the target month
    /// is out of range.
    pub fn change_month(&mut self, delta: i32) -> bool {
        match self.shifted(delta) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Header text, e.g. `March 2024`.
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl Display for DateCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse errors for `YYYY-MM` cursor strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorParseError {
    Malformed(String),
    OutOfRange(String),
}

impl Display for CursorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "expected YYYY-MM, got `{value}`"),
            Self::OutOfRange(value) => write!(f, "month out of range: `{value}`"),
        }
    }
}

impl Error for CursorParseError {}

impl FromStr for DateCursor {
    type Err = CursorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (year, month) = trimmed
            .rsplit_once('-')
            .ok_or_else(|| CursorParseError::Malformed(trimmed.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| CursorParseError::Malformed(trimmed.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| CursorParseError::Malformed(trimmed.to_string()))?;
        Self::new(year, month).ok_or_else(|| CursorParseError::OutOfRange(trimmed.to_string()))
    }
}

pub(crate) fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Cursor construction keeps (year, month) inside chrono's range.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::{CursorParseError, DateCursor, MAX_YEAR};

    fn cursor(year: i32, month: u32) -> DateCursor {
        DateCursor::new(year, month).expect("valid test cursor")
    }

    #[test]
    fn new_rejects_invalid_month() {
        assert!(DateCursor::new(2024, 0).is_none());
        assert!(DateCursor::new(2024, 13).is_none());
        assert!(DateCursor::new(MAX_YEAR + 1, 1).is_none());
    }

    #[test]
    fn december_plus_one_is_next_january() {
        assert_eq!(cursor(2023, 12).shifted(1), Some(cursor(2024, 1)));
    }

    #[test]
    fn january_minus_one_is_previous_december() {
        assert_eq!(cursor(2024, 1).shifted(-1), Some(cursor(2023, 12)));
    }

    #[test]
    fn large_deltas_carry_into_years() {
        assert_eq!(cursor(2024, 3).shifted(12), Some(cursor(2025, 3)));
        assert_eq!(cursor(2024, 3).shifted(-27), Some(cursor(2021, 12)));
        assert_eq!(cursor(2024, 3).shifted(100), Some(cursor(2032, 7)));
    }

    #[test]
    fn change_month_out_of_range_is_rejected() {
        let mut edge = cursor(MAX_YEAR, 12);
        assert!(!edge.change_month(1));
        assert_eq!(edge, cursor(MAX_YEAR, 12));
        assert!(!edge.change_month(i32::MIN));
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for month in 1..=12 {
            let mut c = cursor(2020, month);
            assert!(c.change_month(1));
            assert!(c.change_month(-1));
            assert_eq!(c, cursor(2020, month));
        }
    }

    #[test]
    fn parse_and_display_round_trip() {
        let parsed: DateCursor = "2024-03".parse().expect("valid YYYY-MM");
        assert_eq!(parsed, cursor(2024, 3));
        assert_eq!(parsed.to_string(), "2024-03");
        assert_eq!(parsed.title(), "March 2024");
        assert!(matches!(
            "2024-13".parse::<DateCursor>(),
            Err(CursorParseError::OutOfRange(_))
        ));
        assert!(matches!(
            "march".parse::<DateCursor>(),
            Err(CursorParseError::Malformed(_))
        ));
    }
}
