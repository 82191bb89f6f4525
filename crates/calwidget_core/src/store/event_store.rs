//! In-memory event store with create/update/delete semantics.
//!
//! # Responsibility
//! - Own the ordered event collection.
//! - Assign unique ids on create; refuse the add when no id is left.
//!
//! # Invariants
//! - No two events share an `id`.
//! - Collection order is insertion order; nothing here sorts.
//! - Rejected or missed operations leave the collection untouched.

use crate::model::event::{Event, EventForm, EventId};
use chrono::{NaiveDate, Utc};
use log::{debug, warn};

/// Result of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The event was found and its mutable fields replaced.
    Updated,
    /// No event with that id; nothing changed.
    NotFound,
    /// Form validation failed; nothing changed.
    Rejected,
}

/// Ordered collection of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted events, keeping their order.
    ///
    /// Later duplicates of an already seen id are dropped.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        for event in events {
            if store.get(event.id).is_none() {
                store.events.push(event);
            }
        }
        store
    }

    /// Appends a new event for `date`.
    ///
    /// Returns `None` without touching the store when the form name is empty
    /// or no free id is left past either end of the ids in use.
    pub fn add_event(&mut self, date: NaiveDate, form: &EventForm) -> Option<EventId> {
        let valid = form.validate().ok()?;
        let Some(id) = self.next_id() else {
            warn!(
                "event=event_add module=store status=rejected reason=id_space_exhausted total={}",
                self.events.len()
            );
            return None;
        };
        self.events.push(Event::from_form(id, date, valid));
        debug!(
            "event=event_add module=store status=ok id={} total={}",
            id,
            self.events.len()
        );
        Some(id)
    }

    /// Replaces name, times and description of the event with `id`.
    pub fn update_event(&mut self, id: EventId, form: &EventForm) -> UpdateOutcome {
        let Ok(valid) = form.validate() else {
            return UpdateOutcome::Rejected;
        };
        match self.events.iter_mut().find(|event| event.id == id) {
            Some(event) => {
                event.apply(valid);
                debug!("event=event_update module=store status=ok id={id}");
                UpdateOutcome::Updated
            }
            None => {
                debug!("event=event_update module=store status=not_found id={id}");
                UpdateOutcome::NotFound
            }
        }
    }

    /// Removes the event with `id`, returning it when present.
    pub fn delete_event(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|event| event.id == id)?;
        let removed = self.events.remove(index);
        debug!(
            "event=event_delete module=store status=ok id={} total={}",
            id,
            self.events.len()
        );
        Some(removed)
    }

    /// Events on `date`'s calendar day, in insertion order.
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|event| event.is_on(date)).collect()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Epoch-millisecond id, bumped past the largest id already in use.
    ///
    /// When the largest id is `i64::MAX`, falls back to one below the
    /// smallest id in use.
    fn next_id(&self) -> Option<EventId> {
        let now = Utc::now().timestamp_millis();
        let Some(max) = self.events.iter().map(|event| event.id).max() else {
            return Some(now);
        };
        if max < now {
            return Some(now);
        }
        max.checked_add(1).or_else(|| {
            self.events
                .iter()
                .map(|event| event.id)
                .min()
                .and_then(|min| min.checked_sub(1))
        })
    }
}
