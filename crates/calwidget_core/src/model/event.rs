//! Calendar event domain model.
//!
//! # Responsibility
//! - Define the event record owned by the event store.
//! - Define the typed editor form and its validation.
//!
//! # Invariants
//! - `id` is unique within a store and never reassigned.
//! - `name` is never empty after trimming.
//! - `id` and `date` do not change after creation.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric event identifier, time-derived at creation.
pub type EventId = i64;

/// One user-created calendar entry attached to a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    /// Free-form text, not validated.
    pub start_time: String,
    /// Free-form text, not validated.
    pub end_time: String,
    /// Empty string means no description.
    pub description: String,
}

impl Event {
    /// Builds an event from validated form values.
    pub fn from_form(id: EventId, date: NaiveDate, form: ValidEventForm) -> Self {
        Self {
            id,
            name: form.name,
            date,
            start_time: form.start_time,
            end_time: form.end_time,
            description: form.description,
        }
    }

    /// Replaces every mutable field. `id` and `date` stay untouched.
    pub fn apply(&mut self, form: ValidEventForm) {
        self.name = form.name;
        self.start_time = form.start_time;
        self.end_time = form.end_time;
        self.description = form.description;
    }

    /// Returns the description when one was entered.
    pub fn description(&self) -> Option<&str> {
        if self.description.is_empty() {
            None
        } else {
            Some(self.description.as_str())
        }
    }

    /// Returns whether this event falls on `date`'s calendar day.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// Validation errors for editor form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyName,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "event name cannot be empty"),
        }
    }
}

impl Error for EventValidationError {}

/// Form state bound to the editor fields Name / Start Time / End Time /
/// Description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl EventForm {
    /// Convenience constructor used by callers that already hold all fields.
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            description: description.into(),
        }
    }

    /// Pre-fills the form from an existing event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
        }
    }

    /// Validates the form for create/update.
    ///
    /// The name is trimmed; the time and description fields pass through
    /// verbatim.
    pub fn validate(&self) -> Result<ValidEventForm, EventValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EventValidationError::EmptyName);
        }

        Ok(ValidEventForm {
            name: name.to_string(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
        })
    }
}

/// Form values that passed validation.
///
/// Only obtainable through [`EventForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEventForm {
    name: String,
    start_time: String,
    end_time: String,
    description: String,
}

#[cfg(test)]
mod tests {
    use super::{Event, EventForm, EventValidationError, ValidEventForm};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn valid(name: &str, start: &str, end: &str, description: &str) -> ValidEventForm {
        EventForm::new(name, start, end, description)
            .validate()
            .expect("named form should validate")
    }

    #[test]
    fn validate_rejects_blank_names() {
        assert_eq!(
            EventForm::new("", "", "", "").validate(),
            Err(EventValidationError::EmptyName)
        );
        assert_eq!(
            EventForm::new("   ", "09:00", "", "").validate(),
            Err(EventValidationError::EmptyName)
        );
    }

    #[test]
    fn validate_trims_name_only() {
        let valid = EventForm::new("  Lunch ", " 12:00", "13:00 ", " notes ")
            .validate()
            .expect("named form should validate");
        let event = Event::from_form(7, day(2024, 3, 15), valid);
        assert_eq!(event.name, "Lunch");
        assert_eq!(event.start_time, " 12:00");
        assert_eq!(event.end_time, "13:00 ");
        assert_eq!(event.description, " notes ");
    }

    #[test]
    fn apply_keeps_id_and_date() {
        let mut event = Event::from_form(1, day(2024, 1, 2), valid("a", "", "", ""));
        event.apply(valid("b", "1", "2", "d"));
        assert_eq!(event.id, 1);
        assert_eq!(event.date, day(2024, 1, 2));
        assert_eq!(event.name, "b");
        assert_eq!(event.description(), Some("d"));
    }

    #[test]
    fn form_round_trips_from_event() {
        let event = Event::from_form(3, day(2024, 5, 1), valid("Standup", "9", "9:15", ""));
        let form = EventForm::from_event(&event);
        assert_eq!(form, EventForm::new("Standup", "9", "9:15", ""));
        assert_eq!(event.description(), None);
    }
}
