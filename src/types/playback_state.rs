use std::fmt;

use crate::error::PlayerError;

/// Transport state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Empty,
    Loaded,
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    pub fn has_media(self) -> bool {
        self != PlaybackState::Empty
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

/// The fixed set of speeds offered by the speed selector.
///
/// `Freeze` holds the current frame; see `GstEngine::set_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    Freeze,
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 5] = [
        PlaybackRate::Freeze,
        PlaybackRate::Half,
        PlaybackRate::Normal,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Freeze => 0.0,
            PlaybackRate::Half => 0.5,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = PlayerError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        // Exact comparison: the selector only ever produces these literals.
        PlaybackRate::ALL
            .into_iter()
            .find(|r| r.as_f64() == rate)
            .ok_or(PlayerError::UnsupportedRate(rate))
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_accepts_enumerated_values() {
        for rate in [0.0, 0.5, 1.0, 1.5, 2.0] {
            let parsed = PlaybackRate::try_from(rate).unwrap();
            assert_eq!(parsed.as_f64(), rate);
        }
    }

    #[test]
    fn test_rate_rejects_other_values() {
        for rate in [0.25, 0.75, 3.0, -1.0, f64::NAN] {
            assert!(matches!(
                PlaybackRate::try_from(rate),
                Err(PlayerError::UnsupportedRate(_))
            ));
        }
    }

    #[test]
    fn test_rate_labels() {
        assert_eq!(PlaybackRate::Freeze.to_string(), "0x");
        assert_eq!(PlaybackRate::OneAndHalf.to_string(), "1.5x");
        assert_eq!(PlaybackRate::default(), PlaybackRate::Normal);
    }

    #[test]
    fn test_state_queries() {
        assert!(!PlaybackState::Empty.has_media());
        assert!(PlaybackState::Stopped.has_media());
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());
    }
}
