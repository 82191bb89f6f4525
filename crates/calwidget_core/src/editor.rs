//! Add/edit dialog state.
//!
//! # Responsibility
//! - Track whether the dialog is open and what it targets.
//! - Hold the typed form bound to the dialog fields.
//!
//! # Invariants
//! - At most one target at a time; opening replaces the previous one.
//! - `Editing` holds a snapshot copy; the event store stays the source of
//!   truth.

use crate::model::event::{Event, EventForm, EventId};
use chrono::NaiveDate;

/// Dialog state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    /// Adding a new event on `date`.
    Creating { date: NaiveDate, form: EventForm },
    /// Editing a snapshot of an existing event.
    Editing { event: Event, form: EventForm },
}

impl EditorState {
    /// Opens the dialog in create mode for `date` with empty fields.
    pub fn open_create(&mut self, date: NaiveDate) {
        *self = Self::Creating {
            date,
            form: EventForm::default(),
        };
    }

    /// Opens the dialog in edit mode, pre-filled from `event`.
    pub fn open_edit(&mut self, event: Event) {
        let form = EventForm::from_event(&event);
        *self = Self::Editing { event, form };
    }

    /// Closes the dialog and drops unsaved input.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Day the dialog targets: the clicked day, or the edited event's date.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Closed => None,
            Self::Creating { date, .. } => Some(*date),
            Self::Editing { event, .. } => Some(event.date),
        }
    }

    /// Id of the event being edited, if any.
    pub fn editing_id(&self) -> Option<EventId> {
        match self {
            Self::Editing { event, .. } => Some(event.id),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&EventForm> {
        match self {
            Self::Closed => None,
            Self::Creating { form, .. } | Self::Editing { form, .. } => Some(form),
        }
    }

    /// Mutable access for binding input fields.
    pub fn form_mut(&mut self) -> Option<&mut EventForm> {
        match self {
            Self::Closed => None,
            Self::Creating { form, .. } | Self::Editing { form, .. } => Some(form),
        }
    }

    /// Dialog heading.
    pub fn mode_label(&self) -> Option<&'static str> {
        match self {
            Self::Closed => None,
            Self::Creating { .. } => Some("Add Event"),
            Self::Editing { .. } => Some("Edit Event"),
        }
    }

    /// Label of the primary action button.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            Self::Closed => None,
            Self::Creating { .. } => Some("Save Event"),
            Self::Editing { .. } => Some("Update Event"),
        }
    }
}
