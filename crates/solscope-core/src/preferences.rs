//! User preferences persistence
//!
//! Stores UI preferences in `<data_dir>/solscope-preferences.json`.

use crate::models::SortKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color scheme for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn toggle(&self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Color scheme (dark / light)
    pub color_scheme: ColorScheme,

    /// Leaderboard sort key restored on startup
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Preferences {
    /// Load preferences from `<data_dir>/solscope-preferences.json`.
    /// Returns defaults on any I/O or parse error (graceful degradation).
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("solscope-preferences.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to `<data_dir>/solscope-preferences.json`.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory for preferences")?;
        let path = data_dir.join("solscope-preferences.json");
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_defaults() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.color_scheme, ColorScheme::Dark);
        assert_eq!(prefs.default_sort, SortKey::Score);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let prefs = Preferences {
            color_scheme: ColorScheme::Light,
            default_sort: SortKey::Nfts,
        };
        prefs.save(dir.path()).unwrap();

        let reloaded = Preferences::load(dir.path());
        assert_eq!(reloaded.color_scheme, ColorScheme::Light);
        assert_eq!(reloaded.default_sort, SortKey::Nfts);
    }

    #[test]
    fn test_corrupt_file_returns_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("solscope-preferences.json"), "{ nope").unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.color_scheme, ColorScheme::Dark);
    }
}
