//! Settings loaded from `tombola.toml`
//!
//! Every key is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name looked up in the platform config directory
pub const SETTINGS_FILE: &str = "tombola.toml";

/// Tunables for the draw animation and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of the spin transition
    pub spin_duration_ms: u64,
    /// Time between rendered frames
    pub frame_interval_ms: u64,
    /// Minimum entries that must scroll past per second of spin
    pub min_items_per_second: u32,
    /// Minimum number of loops over the pool in one spin
    pub min_loops: usize,
    /// Re-shuffles allowed when the last loop would repeat the next entry
    pub reshuffle_attempts: usize,
    /// Visible rows in the spin viewport (odd, so one row sits in the middle)
    pub viewport_rows: usize,
    /// Ring the terminal bell for spin and winner cues
    pub sound: bool,
    /// Where exported winner lists are written
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_duration_ms: 10_000,
            frame_interval_ms: 33,
            min_items_per_second: 15,
            min_loops: 6,
            reshuffle_attempts: 25,
            viewport_rows: 5,
            sound: true,
            export_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file; it must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Load from the platform config directory, falling back to defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// `<config dir>/tombola.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "onyx", "tombola").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        if self.spin_duration_ms == 0 {
            return Err(Error::Config("spin_duration_ms must be positive".into()));
        }
        if self.frame_interval_ms == 0 {
            return Err(Error::Config("frame_interval_ms must be positive".into()));
        }
        if self.min_loops == 0 {
            return Err(Error::Config("min_loops must be at least 1".into()));
        }
        if self.viewport_rows == 0 || self.viewport_rows % 2 == 0 {
            return Err(Error::Config(format!(
                "viewport_rows must be odd, got {}",
                self.viewport_rows
            )));
        }
        Ok(())
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Directory for exports, defaulting to the working directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.spin_duration(), Duration::from_secs(10));
        assert_eq!(settings.min_loops, 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml("spin_duration_ms = 3000\nsound = false\n").unwrap();
        assert_eq!(settings.spin_duration_ms, 3000);
        assert!(!settings.sound);
        assert_eq!(settings.min_items_per_second, 15);
    }

    #[test]
    fn test_rejects_even_viewport() {
        assert!(matches!(
            Settings::from_toml("viewport_rows = 4"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(
            Settings::from_toml("spin_duration_ms = \"fast\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "export_dir = \"/tmp/raffle\"\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/raffle"));
    }
}
