//! Persisted application settings.
//!
//! A small JSON file holding preferences that survive restarts: the theme
//! and an optional override for the media library folder. Editor state is
//! deliberately not persisted; only exported images are durable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Color theme preference.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

/// All persisted settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// UI theme.
    pub theme: ThemeChoice,
    /// Where exported images go; `None` uses the platform Pictures folder.
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    /// Convert to JSON for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from stored JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Where the settings file lives:
    /// - Linux: ~/.config/sticker-studio/settings.json
    /// - macOS: ~/Library/Application Support/sticker-studio/settings.json
    /// - Windows: %APPDATA%\sticker-studio\settings.json
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        path.push("sticker-studio");
        path.push("settings.json");
        path
    }

    /// Load settings from disk, writing defaults on first run.
    /// Malformed content falls back to defaults with a logged warning.
    pub fn load_or_init() -> Self {
        let path = Self::default_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let settings = Self::default();
            match settings.save_to(&path) {
                Ok(()) => println!("📁 Wrote default settings to {}", path.display()),
                Err(e) => eprintln!("⚠️  Could not write default settings: {e}"),
            }
            settings
        }
    }

    /// Load from an explicit path, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("⚠️  Malformed settings at {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️  Could not read settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create settings directory: {e}"))?;
        }

        let json = self
            .to_json()
            .map_err(|e| format!("failed to serialize settings: {e}"))?;

        std::fs::write(path, json).map_err(|e| format!("failed to write settings: {e}"))
    }
}
