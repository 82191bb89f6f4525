//! Calendar widget state and write-through facade.
//!
//! # Responsibility
//! - `CalendarState`: cursor, event store, editor and today's date, with one
//!   method per user interaction. No storage access.
//! - `CalendarWidget`: a `CalendarState` plus a `PersistenceBridge`; writes
//!   the full event collection after every transition that changed it.
//!
//! # Invariants
//! - The event store is the only source of truth for events.
//! - Storage failures never roll back or discard in-memory state.

use crate::calendar::cursor::DateCursor;
use crate::calendar::grid::{build_month_grid, DayCell};
use crate::config::WidgetConfig;
use crate::editor::EditorState;
use crate::model::event::{Event, EventId};
use crate::persist::bridge::{LoadOutcome, PersistenceBridge};
use crate::persist::kv::KeyValueStore;
use crate::store::event_store::{EventStore, UpdateOutcome};
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// Whether a transition altered the event collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    EventsChanged,
}

impl Change {
    pub fn events_changed(self) -> bool {
        self == Self::EventsChanged
    }
}

/// Widget state owned by the top-level view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    cursor: DateCursor,
    today: NaiveDate,
    store: EventStore,
    editor: EditorState,
}

impl CalendarState {
    /// Starts on `today`'s month with the given events and a closed editor.
    pub fn new(today: NaiveDate, store: EventStore) -> Self {
        Self {
            cursor: DateCursor::containing(today),
            today,
            store,
            editor: EditorState::Closed,
        }
    }

    pub fn cursor(&self) -> DateCursor {
        self.cursor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Mutable editor access for form field binding.
    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    /// Moves the displayed month by `delta`; out-of-range moves are ignored.
    pub fn change_month(&mut self, delta: i32) -> Change {
        self.cursor.change_month(delta);
        Change::Unchanged
    }

    /// Jumps to an explicit month.
    pub fn go_to(&mut self, cursor: DateCursor) -> Change {
        self.cursor = cursor;
        Change::Unchanged
    }

    /// Updates the date used for the "today" highlight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Day cells for the displayed month.
    pub fn month_grid(&self) -> Vec<DayCell> {
        build_month_grid(self.cursor, self.today)
    }

    /// Events on `date`, in insertion order.
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<&Event> {
        self.store.events_for_day(date)
    }

    /// Click on a day cell: open the editor in create mode.
    pub fn click_day(&mut self, date: NaiveDate) -> Change {
        self.editor.open_create(date);
        Change::Unchanged
    }

    /// Click on an event label: open the editor pre-filled with a snapshot.
    ///
    /// Unknown ids leave the editor as it was.
    pub fn click_event(&mut self, id: EventId) -> Change {
        if let Some(event) = self.store.get(id) {
            self.editor.open_edit(event.clone());
        }
        Change::Unchanged
    }

    /// Save or Update button.
    ///
    /// An empty name keeps the dialog open and changes nothing. Otherwise the
    /// dialog closes, including when the edited event no longer exists.
    pub fn submit(&mut self) -> Change {
        match &self.editor {
            EditorState::Closed => Change::Unchanged,
            EditorState::Creating { date, form } => match self.store.add_event(*date, form) {
                Some(_) => {
                    self.editor.close();
                    Change::EventsChanged
                }
                None => Change::Unchanged,
            },
            EditorState::Editing { event, form } => {
                match self.store.update_event(event.id, form) {
                    UpdateOutcome::Rejected => Change::Unchanged,
                    UpdateOutcome::NotFound => {
                        self.editor.close();
                        Change::Unchanged
                    }
                    UpdateOutcome::Updated => {
                        self.editor.close();
                        Change::EventsChanged
                    }
                }
            }
        }
    }

    /// Delete button of the edit dialog.
    pub fn delete_edited(&mut self) -> Change {
        match self.editor.editing_id() {
            Some(id) => {
                let change = self.delete_event(id);
                self.editor.close();
                change
            }
            None => Change::Unchanged,
        }
    }

    /// Removes an event by id; the editor need not be open.
    ///
    /// An editor editing that event is closed.
    pub fn delete_event(&mut self, id: EventId) -> Change {
        if self.editor.editing_id() == Some(id) {
            self.editor.close();
        }
        match self.store.delete_event(id) {
            Some(_) => Change::EventsChanged,
            None => Change::Unchanged,
        }
    }

    /// Close button: discard the dialog without touching events.
    pub fn close_editor(&mut self) -> Change {
        self.editor.close();
        Change::Unchanged
    }
}

/// Non-fatal message for the host to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Stored events could not be read; the widget started empty.
    LoadFailed(String),
    /// Some stored records were unusable and were dropped.
    RecordsSkipped(usize),
    /// The latest change is only held in memory.
    SaveFailed(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadFailed(reason) => write!(f, "could not load saved events: {reason}"),
            Self::RecordsSkipped(count) => write!(f, "skipped {count} unreadable saved event(s)"),
            Self::SaveFailed(reason) => write!(f, "could not save events: {reason}"),
        }
    }
}

/// Mounted widget: state plus write-through persistence.
pub struct CalendarWidget<S: KeyValueStore> {
    state: CalendarState,
    bridge: PersistenceBridge<S>,
    notice: Option<Notice>,
}

impl<S: KeyValueStore> CalendarWidget<S> {
    /// Mounts the widget: loads stored events and opens on `today`'s month.
    ///
    /// Load failures start an empty store and raise a `Notice`.
    pub fn mount(storage: S, config: &WidgetConfig, today: NaiveDate) -> Self {
        let bridge = PersistenceBridge::new(storage, config);
        let (events, notice) = match bridge.load() {
            LoadOutcome::Missing => (Vec::new(), None),
            LoadOutcome::Loaded(decoded) => {
                let notice =
                    (decoded.skipped > 0).then_some(Notice::RecordsSkipped(decoded.skipped));
                (decoded.events, notice)
            }
            LoadOutcome::Failed(err) => {
                warn!("event=widget_mount module=widget status=degraded reason=load_failed");
                (Vec::new(), Some(Notice::LoadFailed(err.to_string())))
            }
        };

        let store = EventStore::from_events(events);
        info!(
            "event=widget_mount module=widget status=ok events={}",
            store.len()
        );
        Self {
            state: CalendarState::new(today, store),
            bridge,
            notice,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Applies one state transition and writes through when events changed.
    pub fn apply(&mut self, transition: impl FnOnce(&mut CalendarState) -> Change) -> Change {
        let change = transition(&mut self.state);
        if change.events_changed() {
            self.persist();
        }
        change
    }

    pub fn change_month(&mut self, delta: i32) -> Change {
        self.apply(|state| state.change_month(delta))
    }

    pub fn go_to(&mut self, cursor: DateCursor) -> Change {
        self.apply(|state| state.go_to(cursor))
    }

    pub fn click_day(&mut self, date: NaiveDate) -> Change {
        self.apply(|state| state.click_day(date))
    }

    pub fn click_event(&mut self, id: EventId) -> Change {
        self.apply(|state| state.click_event(id))
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        self.state.editor_mut()
    }

    /// Moves the "today" highlight, e.g. after midnight in a long session.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.state.set_today(today);
    }

    pub fn submit(&mut self) -> Change {
        self.apply(CalendarState::submit)
    }

    pub fn delete_edited(&mut self) -> Change {
        self.apply(CalendarState::delete_edited)
    }

    pub fn delete_event(&mut self, id: EventId) -> Change {
        self.apply(|state| state.delete_event(id))
    }

    pub fn close_editor(&mut self) -> Change {
        self.apply(CalendarState::close_editor)
    }

    /// Latest notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns and clears the latest notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Storage backend, for hosts that inspect what was written.
    pub fn storage(&self) -> &S {
        self.bridge.storage()
    }

    /// Unmounts the widget, handing back the storage backend.
    pub fn into_storage(self) -> S {
        self.bridge.into_storage()
    }

    fn persist(&mut self) {
        match self.bridge.save(self.state.store().events()) {
            Ok(_) => {
                if matches!(self.notice, Some(Notice::SaveFailed(_))) {
                    self.notice = None;
                }
            }
            Err(err) => {
                warn!(
                    "event=widget_persist module=widget status=degraded events={}",
                    self.state.store().len()
                );
                self.notice = Some(Notice::SaveFailed(err.to_string()));
            }
        }
    }
}
