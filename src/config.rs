//! Runtime settings read from the environment.

use std::path::PathBuf;

/// Default directory holding `scaler.json` and `model.json`.
pub const DEFAULT_ARTIFACT_DIR: &str = "models";

/// Default directory holding the image assets.
pub const DEFAULT_ASSET_DIR: &str = "images";

/// Default log file used when logging away from the terminal.
pub const DEFAULT_LOG_FILE: &str = "batterylife.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether logs should go to a file for this terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub artifact_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Read settings from `BATTERYLIFE_*` variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            artifact_dir: non_empty("BATTERYLIFE_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.artifact_dir),
            asset_dir: non_empty("BATTERYLIFE_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            log_mode: non_empty("BATTERYLIFE_LOG_MODE")
                .map(|v| LogMode::parse(v.trim()))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty("BATTERYLIFE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("BATTERYLIFE_ARTIFACT_DIR", "/opt/model"),
            ("BATTERYLIFE_ASSET_DIR", "/opt/images"),
            ("BATTERYLIFE_LOG_MODE", "stdout"),
        ]);

        assert_eq!(s.artifact_dir, PathBuf::from("/opt/model"));
        assert_eq!(s.asset_dir, PathBuf::from("/opt/images"));
        assert_eq!(s.log_mode, LogMode::Stdout);
        assert_eq!(s.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_blank_values_ignored() {
        let s = settings(&[("BATTERYLIFE_ARTIFACT_DIR", "  ")]);
        assert_eq!(s.artifact_dir, PathBuf::from(DEFAULT_ARTIFACT_DIR));
    }

    #[test]
    fn test_log_mode_auto() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
