use gstreamer as gst;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    #[error("invalid media path: {0}")]
    InvalidPath(String),

    #[error("could not open media: {0}")]
    Media(String),

    #[error("no media loaded")]
    NoMediaLoaded,

    #[error("media length is unknown")]
    IndeterminateLength,

    #[error("unsupported playback rate {0}")]
    UnsupportedRate(f64),

    #[error("media engine error: {0}")]
    Engine(String),
}

impl PlayerError {
    /// Errors worth interrupting the user for. Everything else is a silent no-op.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, PlayerError::Media(_) | PlayerError::Engine(_))
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;

impl From<gst::glib::Error> for PlayerError {
    fn from(e: gst::glib::Error) -> Self {
        PlayerError::Engine(e.to_string())
    }
}

impl From<gst::glib::BoolError> for PlayerError {
    fn from(e: gst::glib::BoolError) -> Self {
        PlayerError::Engine(e.to_string())
    }
}

impl From<gst::StateChangeError> for PlayerError {
    fn from(e: gst::StateChangeError) -> Self {
        PlayerError::Engine(e.to_string())
    }
}
