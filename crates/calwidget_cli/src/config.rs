//! Path and widget settings resolved from command-line flags.

use anyhow::{Context, Result};
use calwidget_core::{default_log_level, EmptyStorePolicy, WidgetConfig};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "calwidget";
const DB_FILE_NAME: &str = "calwidget.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Effective runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub widget: WidgetConfig,
}

impl CliConfig {
    /// Fills unset flags with defaults under the platform data directory.
    pub fn resolve(
        db: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
        keep_stale_on_empty: bool,
    ) -> Result<Self> {
        let app_dir = match (&db, &log_dir) {
            (Some(_), Some(_)) => None,
            _ => Some(default_app_dir()?),
        };
        let db_path = match db {
            Some(path) => path,
            None => app_dir
                .as_deref()
                .map(|dir| dir.join(DB_FILE_NAME))
                .context("no data directory available")?,
        };
        let log_dir = match log_dir {
            Some(path) => absolute(&path)?,
            None => app_dir
                .as_deref()
                .map(|dir| dir.join(LOG_DIR_NAME))
                .context("no data directory available")?,
        };

        let empty_store_policy = if keep_stale_on_empty {
            EmptyStorePolicy::KeepStale
        } else {
            EmptyStorePolicy::WriteEmpty
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
            widget: WidgetConfig {
                empty_store_policy,
                ..WidgetConfig::default()
            },
        })
    }
}

fn default_app_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("could not determine the local data directory; pass --db and --log-dir")
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("could not read the current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use calwidget_core::EmptyStorePolicy;
    use std::path::PathBuf;

    #[test]
    fn explicit_paths_are_kept_and_log_dir_made_absolute() {
        let config = CliConfig::resolve(
            Some(PathBuf::from("/tmp/cal.sqlite3")),
            Some(PathBuf::from("logs")),
            Some("warn".to_string()),
            true,
        )
        .expect("explicit paths should resolve");

        assert_eq!(config.db_path, PathBuf::from("/tmp/cal.sqlite3"));
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.widget.empty_store_policy, EmptyStorePolicy::KeepStale);
        assert_eq!(config.widget.storage_key, "events");
    }
}
