use calwidget_core::{build_month_grid, days_in_month, CalendarState, DateCursor, EventStore};
use chrono::{Datelike, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn grid_covers_every_day_of_every_month_in_order() {
    let today = date(2000, 1, 1);
    for year in [1900, 1999, 2000, 2023, 2024, 2100] {
        for month in 1..=12 {
            let cursor = DateCursor::new(year, month).expect("valid cursor");
            let cells = build_month_grid(cursor, today);

            assert_eq!(cells.len() as u32, days_in_month(year, month));
            assert_eq!(cells.first().expect("month has days").date, date(year, month, 1));
            let last = cells.last().expect("month has days").date;
            assert_eq!(last.month(), month);
            assert_ne!(last.succ_opt().expect("next day exists").month(), month);
            assert!(cells.windows(2).all(|pair| pair[0].date < pair[1].date));
        }
    }
}

#[test]
fn known_month_lengths() {
    assert_eq!(days_in_month(2024, 1), 31);
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2024, 4), 30);
    assert_eq!(days_in_month(2025, 2), 28);
}

#[test]
fn plus_twelve_months_lands_on_same_month_next_year() {
    for month in 1..=12 {
        let mut cursor = DateCursor::new(2024, month).expect("valid cursor");
        assert!(cursor.change_month(12));
        assert_eq!(cursor, DateCursor::new(2025, month).expect("valid cursor"));
    }
}

#[test]
fn state_navigation_wraps_years_and_regrids() {
    let mut state = CalendarState::new(date(2024, 1, 20), EventStore::new());
    assert_eq!(state.cursor(), DateCursor::new(2024, 1).expect("valid cursor"));

    state.change_month(-1);
    assert_eq!(state.cursor(), DateCursor::new(2023, 12).expect("valid cursor"));
    assert_eq!(state.month_grid().len(), 31);
    assert!(state.month_grid().iter().all(|cell| !cell.is_today));

    state.change_month(3);
    assert_eq!(state.cursor(), DateCursor::new(2024, 3).expect("valid cursor"));

    state.go_to(DateCursor::new(2024, 2).expect("valid cursor"));
    assert_eq!(state.month_grid().len(), 29);

    state.change_month(-1);
    let grid = state.month_grid();
    assert_eq!(grid.iter().filter(|cell| cell.is_today).count(), 1);
    assert_eq!(grid[19].date, date(2024, 1, 20));
    assert!(grid[19].is_today);
}
