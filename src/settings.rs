//! Settings file: an optional fixed seed plus game tuning, stored as JSON.
//!
//! Every field is optional in the file; missing values take their defaults and
//! loaded values are sanitized before use.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::GameConfig;

/// Environment variable naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "TILE_TETRIS_CONFIG";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a clock-derived seed is used when absent.
    pub seed: Option<u32>,
    pub game: GameConfig,
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.game = self.game.sanitized();
        self
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$TILE_TETRIS_CONFIG`, else `$XDG_CONFIG_HOME/tile-tetris/settings.json`,
    /// else `~/.config/tile-tetris/settings.json`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os(SETTINGS_PATH_ENV),
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )
    }

    fn from_vars(
        explicit: Option<OsString>,
        xdg: Option<OsString>,
        home: Option<OsString>,
    ) -> Self {
        if let Some(explicit) = explicit {
            return Self::at(explicit);
        }

        let base = xdg
            .map(PathBuf::from)
            .or_else(|| home.map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("tile-tetris").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and sanitize; falls back to defaults when the file is missing or
    /// invalid.
    pub fn load(&self) -> Settings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("no settings at {}: {}", self.path.display(), err);
                return Settings::default();
            }
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(
                    "ignoring invalid settings file {}: {}",
                    self.path.display(),
                    err
                );
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tile-tetris-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn explicit_path_wins() {
        let store = SettingsStore::from_vars(
            Some("/tmp/custom.json".into()),
            Some("/xdg".into()),
            Some("/home/me".into()),
        );
        assert_eq!(store.path(), Path::new("/tmp/custom.json"));
    }

    #[test]
    fn xdg_then_home_fallback() {
        let store = SettingsStore::from_vars(None, Some("/xdg".into()), Some("/home/me".into()));
        assert_eq!(store.path(), Path::new("/xdg/tile-tetris/settings.json"));

        let store = SettingsStore::from_vars(None, None, Some("/home/me".into()));
        assert_eq!(
            store.path(),
            Path::new("/home/me/.config/tile-tetris/settings.json")
        );
    }

    #[test]
    fn missing_file_loads_defaults() {
        let store = SettingsStore::at(scratch_path("does-not-exist.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults_and_sanitizes() {
        let path = scratch_path("partial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "seed": 42, "game": { "level_divisor": 0, "move_delay_ms": 80 } }"#)
            .unwrap();

        let settings = SettingsStore::at(&path).load();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.game.move_delay_ms, 80);
        assert_eq!(settings.game.level_divisor, 1);
        assert_eq!(settings.game.rotate_delay_ms, GameConfig::default().rotate_delay_ms);
    }

    #[test]
    fn invalid_file_loads_defaults() {
        let path = scratch_path("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SettingsStore::at(&path).load(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let path = scratch_path("nested/saved.json");
        let store = SettingsStore::at(&path);
        let mut settings = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        settings.game.fall_delays_ms[0] = 500;

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }
}
