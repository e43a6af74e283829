//! Runtime configuration and fixed tuning constants.
//!
//! # Responsibility
//! - Resolve data/log locations from the environment.
//! - Hold the window sizes and palettes the engine and services share.
//!
//! # Invariants
//! - Resolved directories are absolute.
//! - Environment lookups never panic; unset or blank values fall back.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "GOALTRACK_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "GOALTRACK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GOALTRACK_LOG_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const LOG_SUBDIR: &str = "logs";

// ===== Progress engine windows =====

/// Weekly points appended after the last numeric entry.
pub const PROJECTION_WEEKS: u32 = 12;

/// Trailing days bucketed by the duration chart, today included.
pub const DURATION_WINDOW_DAYS: u32 = 30;

/// Trailing days whose weeks are bucketed by the frequency chart.
pub const FREQUENCY_WINDOW_DAYS: u32 = 60;

/// Share of the value range added above and below the numeric axis.
pub const AXIS_PADDING_RATIO: f64 = 0.10;

/// Evenly spaced y-axis labels, ends included.
pub const AXIS_TICK_COUNT: usize = 5;

// ===== Tags =====

/// Colors assigned to tags created without one.
pub const TAG_PALETTE: &[&str] = &[
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#3b82f6", "#8b5cf6", "#ec4899",
];

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Builds a config rooted at `data_dir` with default logging.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = absolutize(data_dir.as_ref());
        let log_dir = data_dir.join(LOG_SUBDIR);
        Self {
            data_dir,
            log_level: default_log_level().to_string(),
            log_dir,
        }
    }

    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = read(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let mut config = Self::with_data_dir(data_dir);
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(log_dir) = read(LOG_DIR_ENV) {
            config.log_dir = absolutize(Path::new(&log_dir));
        }
        config
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_put_logs_under_data_dir() {
        let config = CoreConfig::from_lookup(|_| None);
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with(DEFAULT_DATA_DIR));
        assert_eq!(config.log_dir, config.data_dir.join(LOG_SUBDIR));
    }

    #[test]
    fn lookup_overrides_and_ignores_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (DATA_DIR_ENV, "/srv/goaltrack"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "   "),
        ]);
        let config = CoreConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/srv/goaltrack"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/srv/goaltrack/logs"));
    }
}
