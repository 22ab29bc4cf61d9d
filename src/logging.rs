//! Tracing setup; logs go to a file because the terminal belongs to the map

use crate::settings::LogSettings;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LAUNCHMAP_LOG";

/// Filter directive: `LAUNCHMAP_LOG` wins over the settings file, default "info"
pub fn filter_directive(env_value: Option<String>, settings: &LogSettings) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| settings.level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Install the global subscriber, returning the log file path
pub fn init(settings: &LogSettings) -> io::Result<PathBuf> {
    let path = settings.file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let directive = filter_directive(std::env::var(LOG_ENV).ok(), settings);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    tracing::debug!(%directive, path = %path.display(), "logging initialized");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_settings() {
        let settings = LogSettings { file: None, level: Some("debug".into()) };
        assert_eq!(filter_directive(Some("trace".into()), &settings), "trace");
        assert_eq!(filter_directive(Some("  ".into()), &settings), "debug");
        assert_eq!(filter_directive(None, &LogSettings::default()), "info");
    }

    #[test]
    fn init_creates_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            file: Some(dir.path().join("nested").join("launchmap.log")),
            level: Some("warn".into()),
        };
        let path = init(&settings).unwrap();
        assert!(path.exists());
    }
}
