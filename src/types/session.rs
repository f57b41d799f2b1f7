use crate::config::PlayerConfig;
use crate::types::media::MediaHandle;
use crate::types::playback_state::{PlaybackRate, PlaybackState};

pub const DEFAULT_VOLUME: u8 = 50;

/// PlayerSession is the run-time state of one controller instance.
/// It is never persisted; it lives as long as the window does.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    pub media: Option<MediaHandle>,
    pub volume: u8,
    pub rate: PlaybackRate,
    pub fullscreen: bool,
    pub state: PlaybackState,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self {
            media: None,
            volume: DEFAULT_VOLUME,
            rate: PlaybackRate::Normal,
            fullscreen: false,
            state: PlaybackState::Empty,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            volume: config.initial_volume.min(100),
            rate: PlaybackRate::try_from(config.initial_rate).unwrap_or_default(),
            ..Self::new()
        }
    }

    /// Replace the loaded media. Volume and rate are kept.
    pub fn load(&mut self, media: MediaHandle) {
        self.media = Some(media);
        self.state = PlaybackState::Loaded;
    }
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new()
    }
}
