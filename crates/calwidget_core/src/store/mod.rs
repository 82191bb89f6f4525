//! Event store: the single owner of event records.
//!
//! # Responsibility
//! - Provide create/update/delete/query over the in-memory collection.
//! - Stay storage-agnostic; persistence lives in `crate::persist`.

pub mod event_store;
