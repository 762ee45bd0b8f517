//! Demo settings, read from `demo.json` in the config directory.
//!
//! A missing file means defaults. Unknown fields are ignored so older files
//! keep working.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use hlist::{ListConfig, SelectionMode};
use serde::Deserialize;
use simplelog::LevelFilter;

use crate::error::{DemoError, DemoResult};
use crate::paths;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub selection_mode: SelectionMode,
    /// Number of generated items.
    pub items: usize,
    /// Width of one cell in terminal columns.
    pub column_width: u16,
    pub autoscroll_interval_ms: u64,
    pub border_width: i32,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Indices of items that start insensitive.
    pub insensitive: Vec<usize>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Extended,
            items: 120,
            column_width: 16,
            autoscroll_interval_ms: 100,
            border_width: 0,
            log_level: "debug".to_string(),
            insensitive: Vec::new(),
        }
    }
}

impl DemoSettings {
    /// Load settings from the default location.
    pub fn load() -> DemoResult<Self> {
        let path = paths::settings_file().ok_or(DemoError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> DemoResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|source| DemoError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn list_config(&self) -> ListConfig {
        ListConfig::new(self.selection_mode)
            .autoscroll_interval(Duration::from_millis(self.autoscroll_interval_ms))
            .border_width(self.border_width)
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DemoSettings::load_from(&dir.path().join("demo.json")).unwrap();
        assert_eq!(settings, DemoSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        fs::write(&path, r#"{ "selection_mode": "browse", "items": 7, "unknown": 1 }"#).unwrap();

        let settings = DemoSettings::load_from(&path).unwrap();

        assert_eq!(settings.selection_mode, SelectionMode::Browse);
        assert_eq!(settings.items, 7);
        assert_eq!(settings.column_width, 16);
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DemoSettings::load_from(&path).unwrap_err();

        assert!(matches!(err, DemoError::Settings { .. }));
        assert!(err.to_string().contains("demo.json"));
    }

    #[test]
    fn test_list_config_from_settings() {
        let settings = DemoSettings {
            selection_mode: SelectionMode::Multiple,
            autoscroll_interval_ms: 40,
            border_width: 2,
            ..DemoSettings::default()
        };

        let config = settings.list_config();

        assert_eq!(config.selection_mode, SelectionMode::Multiple);
        assert_eq!(config.autoscroll_interval, Duration::from_millis(40));
        assert_eq!(config.border_width, 2);
    }

    #[test]
    fn test_level_filter_falls_back_to_debug() {
        let settings = DemoSettings {
            log_level: "loud".to_string(),
            ..DemoSettings::default()
        };
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
    }
}
