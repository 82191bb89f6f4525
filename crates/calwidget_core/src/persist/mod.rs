//! Persistence boundary for widget events.
//!
//! # Responsibility
//! - Define the key-value storage contract (`kv`).
//! - Map the event collection to and from its stored JSON form (`bridge`).

pub mod bridge;
pub mod kv;
