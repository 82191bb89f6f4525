//! Month grid builder.
//!
//! # Responsibility
//! - Derive the day cells of the displayed month from a `DateCursor`.
//!
//! # Invariants
//! - Cells cover day 1 through the last day of the month, ascending.
//! - No cells from adjacent months are produced; layouts that want a
//!   weekday-aligned 7-column grid use `leading_blanks`.

use super::cursor::{first_of_month, DateCursor};
use chrono::{Datelike, Days, NaiveDate};

/// Weekday header labels for a Sunday-first 7-column layout.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One calendar date rendered in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Set when `date` is the caller's "today".
    pub is_today: bool,
}

impl DayCell {
    /// Day-of-month number shown in the cell.
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Builds the ordered day cells of the cursor's month.
pub fn build_month_grid(cursor: DateCursor, today: NaiveDate) -> Vec<DayCell> {
    let first = cursor.first_day();
    (0..days_in_month(cursor.year(), cursor.month()))
        .filter_map(|offset| first.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| DayCell {
            date,
            is_today: date == today,
        })
        .collect()
}

/// Last day of `year`/`month`, computed as day 0 of the following month.
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN)
}

/// Number of days in `year`/`month`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

/// Blank cells needed before day 1 in a Sunday-first 7-column layout.
pub fn leading_blanks(cursor: DateCursor) -> u32 {
    cursor.first_day().weekday().num_days_from_sunday()
}
