pub mod media_path;
pub mod playback_ops;
