//! Load/save boundary between the event store and key-value storage.
//!
//! # Responsibility
//! - Encode the full event collection as one JSON array under one key.
//! - Decode that blob at mount time.
//!
//! # Invariants
//! - Every save writes the whole collection, replacing the prior value.
//! - Dates are written as `YYYY-MM-DDT00:00:00.000Z`; only the calendar
//!   date is read back.
//! - Records that cannot form a valid event are skipped, not repaired.
//! - At most one record per id is loaded; the first one wins.

use super::kv::{KeyValueStore, KvError};
use crate::config::{EmptyStorePolicy, WidgetConfig};
use crate::model::event::{Event, EventId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Persistence failure.
#[derive(Debug)]
pub enum PersistError {
    Storage(KvError),
    /// Stored blob is not a JSON array of event records.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "malformed stored events: {err}"),
            Self::Encode(err) => write!(f, "failed to encode events: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for PersistError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Wire shape of one persisted event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: EventId,
    name: String,
    date: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    description: String,
}

impl From<&Event> for StoredEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            date: encode_date(event.date),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
        }
    }
}

/// Decoded blob contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvents {
    pub events: Vec<Event>,
    /// Records dropped for an empty name, an unreadable date or a repeated id.
    pub skipped: usize,
}

/// Serializes events into the persisted JSON array form.
pub fn encode_events(events: &[Event]) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredEvent> = events.iter().map(StoredEvent::from).collect();
    serde_json::to_string(&stored)
}

/// Parses the persisted JSON array form.
pub fn decode_events(blob: &str) -> Result<DecodedEvents, serde_json::Error> {
    let stored: Vec<StoredEvent> = serde_json::from_str(blob)?;
    let total = stored.len();
    let mut seen = HashSet::with_capacity(total);
    let events: Vec<Event> = stored
        .into_iter()
        .filter_map(|record| {
            if record.name.trim().is_empty() {
                return None;
            }
            let date = decode_date(&record.date)?;
            if !seen.insert(record.id) {
                return None;
            }
            Some(Event {
                id: record.id,
                name: record.name,
                date,
                start_time: record.start_time,
                end_time: record.end_time,
                description: record.description,
            })
        })
        .collect();

    Ok(DecodedEvents {
        skipped: total - events.len(),
        events,
    })
}

/// ISO-8601 date-time string for a calendar date (midnight UTC).
pub fn encode_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Calendar date of an ISO-8601 date or date-time string.
///
/// RFC 3339 values keep the date as written, ignoring the offset.
pub fn decode_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Result of reading storage at mount time.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Missing,
    Loaded(DecodedEvents),
    /// Storage read or decode failed.
    Failed(PersistError),
}

impl LoadOutcome {
    /// Events to start with; empty unless the load succeeded.
    pub fn into_events(self) -> Vec<Event> {
        match self {
            Self::Loaded(decoded) => decoded.events,
            Self::Missing | Self::Failed(_) => Vec::new(),
        }
    }
}

/// Result of a successful save call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written { count: usize },
    /// Empty collection under `EmptyStorePolicy::KeepStale`.
    SkippedEmpty,
}

/// Reads and writes the event blob through a `KeyValueStore`.
pub struct PersistenceBridge<S: KeyValueStore> {
    storage: S,
    key: String,
    empty_policy: EmptyStorePolicy,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(storage: S, config: &WidgetConfig) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            empty_policy: config.empty_store_policy,
        }
    }

    /// Reads the stored blob.
    ///
    /// Never fails: storage and decode problems come back as
    /// `LoadOutcome::Failed` so callers can start empty.
    pub fn load(&self) -> LoadOutcome {
        let started_at = Instant::now();
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!("event=events_load module=persist status=missing");
                return LoadOutcome::Missing;
            }
            Err(err) => {
                warn!(
                    "event=events_load module=persist status=error error_code=storage_read_failed error={}",
                    err
                );
                return LoadOutcome::Failed(err.into());
            }
        };

        match decode_events(&blob) {
            Ok(decoded) => {
                if decoded.skipped > 0 {
                    warn!(
                        "event=events_load module=persist status=partial skipped={}",
                        decoded.skipped
                    );
                }
                info!(
                    "event=events_load module=persist status=ok count={} duration_ms={}",
                    decoded.events.len(),
                    started_at.elapsed().as_millis()
                );
                LoadOutcome::Loaded(decoded)
            }
            Err(err) => {
                warn!(
                    "event=events_load module=persist status=error error_code=decode_failed blob_len={} error={}",
                    blob.len(),
                    err
                );
                LoadOutcome::Failed(PersistError::Decode(err))
            }
        }
    }

    /// Writes the full collection, replacing the stored value.
    pub fn save(&mut self, events: &[Event]) -> Result<SaveOutcome, PersistError> {
        if events.is_empty() && self.empty_policy == EmptyStorePolicy::KeepStale {
            info!("event=events_save module=persist status=skipped reason=empty_keep_stale");
            return Ok(SaveOutcome::SkippedEmpty);
        }

        let started_at = Instant::now();
        let blob = encode_events(events).map_err(PersistError::Encode)?;
        if let Err(err) = self.storage.set(&self.key, &blob) {
            error!(
                "event=events_save module=persist status=error error_code=storage_write_failed count={} error={}",
                events.len(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=events_save module=persist status=ok count={} duration_ms={}",
            events.len(),
            started_at.elapsed().as_millis()
        );
        Ok(SaveOutcome::Written {
            count: events.len(),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_date, decode_events, encode_date};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn encode_date_is_iso_midnight_utc() {
        assert_eq!(encode_date(day(2024, 3, 15)), "2024-03-15T00:00:00.000Z");
    }

    #[test]
    fn decode_date_accepts_common_iso_forms() {
        assert_eq!(decode_date("2024-03-15T00:00:00.000Z"), Some(day(2024, 3, 15)));
        assert_eq!(decode_date("2024-03-15T18:30:00+02:00"), Some(day(2024, 3, 15)));
        assert_eq!(decode_date("2024-03-15T09:00:00"), Some(day(2024, 3, 15)));
        assert_eq!(decode_date("2024-03-15"), Some(day(2024, 3, 15)));
        assert_eq!(decode_date("15/03/2024"), None);
    }

    #[test]
    fn decode_skips_unusable_records() {
        let blob = r#"[
            {"id": 1, "name": "ok", "date": "2024-03-15T00:00:00.000Z",
             "startTime": "9", "endTime": "10", "description": ""},
            {"id": 2, "name": "", "date": "2024-03-15T00:00:00.000Z"},
            {"id": 3, "name": "bad date", "date": "soon"}
        ]"#;
        let decoded = decode_events(blob).expect("array blob should decode");
        assert_eq!(decoded.skipped, 2);
        assert_eq!(decoded.events.len(), 1);
        assert_eq!(decoded.events[0].id, 1);
        assert_eq!(decoded.events[0].start_time, "9");
    }

    #[test]
    fn decode_keeps_first_record_of_a_repeated_id() {
        let blob = r#"[
            {"id": 7, "name": "first", "date": "2024-03-15"},
            {"id": 7, "name": "second", "date": "2024-03-16"},
            {"id": 8, "name": "", "date": "2024-03-15"},
            {"id": 8, "name": "third", "date": "2024-03-17"}
        ]"#;
        let decoded = decode_events(blob).expect("array blob should decode");
        assert_eq!(decoded.skipped, 2);
        let names: Vec<_> = decoded.events.iter().map(|event| event.name.as_str()).collect();
        assert_eq!(names, ["first", "third"]);
    }

    #[test]
    fn decode_fills_missing_optional_fields() {
        let decoded =
            decode_events(r#"[{"id": 5, "name": "bare", "date": "2024-01-01"}]"#)
                .expect("array blob should decode");
        assert_eq!(decoded.events[0].description, "");
        assert_eq!(decoded.events[0].end_time, "");
    }

    #[test]
    fn decode_rejects_non_array_blob() {
        assert!(decode_events("{\"id\": 1}").is_err());
        assert!(decode_events("not json").is_err());
    }
}
