//! Domain model for calendar events.
//!
//! # Responsibility
//! - Define the event record and the typed editor form.
//!
//! # Invariants
//! - Every event is identified by a unique numeric `EventId`.
//! - Deletion removes the record; there are no tombstones.

pub mod event;
