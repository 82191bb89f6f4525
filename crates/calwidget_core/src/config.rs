//! Widget configuration.

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "events";

/// What the persistence bridge does when the event collection becomes empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyStorePolicy {
    /// Write `[]` so a reload sees the empty collection.
    #[default]
    WriteEmpty,
    /// Skip the write and leave the last non-empty snapshot in storage.
    KeepStale,
}

/// Settings for one mounted widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Key of the JSON blob in key-value storage.
    pub storage_key: String,
    pub empty_store_policy: EmptyStorePolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            empty_store_policy: EmptyStorePolicy::default(),
        }
    }
}
