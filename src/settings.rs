//! Game settings and preferences
//!
//! Read from a JSON file named by `ATOMS_SETTINGS`; anything missing falls
//! back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HEIGHT, MAX_PLAYERS, MAX_WIDTH, MIN_HEIGHT, MIN_PLAYERS, MIN_WIDTH};

/// Configurable limits and terminal preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === START bounds ===
    pub min_players: u8,
    pub max_players: u8,
    pub min_width: u8,
    pub max_width: u8,
    pub min_height: u8,
    pub max_height: u8,

    // === Terminal ===
    /// Redraw the board after every successful PLACE or UNDO
    pub auto_display: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            auto_display: false,
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const ENV_VAR: &'static str = "ATOMS_SETTINGS";

    /// Clamp every bound into what the engine supports
    pub fn sanitized(mut self) -> Self {
        self.min_players = self.min_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.max_players = self.max_players.clamp(self.min_players, MAX_PLAYERS);
        self.min_width = self.min_width.max(MIN_WIDTH);
        self.max_width = self.max_width.max(self.min_width);
        self.min_height = self.min_height.max(MIN_HEIGHT);
        self.max_height = self.max_height.max(self.min_height);
        self
    }

    /// Whether a START request falls inside the configured bounds
    pub fn allows(&self, players: i64, width: i64, height: i64) -> bool {
        (self.min_players as i64..=self.max_players as i64).contains(&players)
            && (self.min_width as i64..=self.max_width as i64).contains(&width)
            && (self.min_height as i64..=self.max_height as i64).contains(&height)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring invalid settings in {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Settings named by `ATOMS_SETTINGS`, or the defaults
    pub fn from_env() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load_from(path),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
