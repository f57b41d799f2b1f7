//! Read-only user configuration for vidview.
//!
//! Settings are looked up once at startup. The player never writes them back.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::playback_state::PlaybackRate;

pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "wmv"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_size: (f32, f32),
    pub initial_volume: u8,
    pub initial_rate: f64,
    /// Extensions offered by the open dialog and accepted by `open_file`.
    pub video_extensions: Vec<String>,
    /// How long the discoverer may probe a file before giving up.
    pub discover_timeout_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            window_title: "Video Player".to_string(),
            window_size: (960.0, 600.0),
            initial_volume: 50,
            initial_rate: 1.0,
            video_extensions: VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            discover_timeout_secs: 5,
        }
    }
}

impl PlayerConfig {
    /// - macOS/Linux: `~/.config/vidview/config.json`
    /// - Windows: `%APPDATA%/vidview/config.json`
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vidview").join("config.json"))
    }

    /// Load config from disk, falling back to defaults when absent or malformed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                log::debug!("no config at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&contents) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let config: PlayerConfig = serde_json::from_str(contents)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.initial_volume > 100 {
            log::warn!("initial_volume {} clamped to 100", self.initial_volume);
            self.initial_volume = 100;
        }
        if PlaybackRate::try_from(self.initial_rate).is_err() {
            log::warn!("initial_rate {} is not selectable, using 1.0", self.initial_rate);
            self.initial_rate = defaults.initial_rate;
        }
        self.video_extensions = self
            .video_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if self.video_extensions.is_empty() {
            self.video_extensions = defaults.video_extensions;
        }
        if self.discover_timeout_secs == 0 {
            self.discover_timeout_secs = defaults.discover_timeout_secs;
        }
        self
    }
}
