//! Core of the calendar widget: month grid, event editing and persistence.
//! Every widget behavior lives here; front ends only render and forward
//! user interactions.

pub mod calendar;
pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod persist;
pub mod store;
pub mod widget;

pub use calendar::cursor::{CursorParseError, DateCursor};
pub use calendar::grid::{
    build_month_grid, days_in_month, last_day_of_month, leading_blanks, DayCell, WEEKDAY_LABELS,
};
pub use config::{EmptyStorePolicy, WidgetConfig, DEFAULT_STORAGE_KEY};
pub use editor::EditorState;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventForm, EventId, EventValidationError, ValidEventForm};
pub use persist::bridge::{
    decode_events, encode_events, DecodedEvents, LoadOutcome, PersistError, PersistenceBridge,
    SaveOutcome,
};
pub use persist::kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use store::event_store::{EventStore, UpdateOutcome};
pub use widget::{CalendarState, CalendarWidget, Change, Notice};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
