use std::path::Path;

use crate::error::Result;
use crate::renderer::frame_sink::FrameSink;
use crate::types::media::MediaHandle;

/// Things the engine reports on its own, outside any request.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    EndOfStream,
    Error(String),
}

/// The transport surface of a decoding backend.
///
/// Implementations own all decoding, rendering and A/V sync. Calls return
/// quickly; anything slow happens on the engine's own threads.
pub trait MediaEngine {
    /// Load `path` as the current media. On error the previously loaded
    /// media, if any, must stay current.
    fn open(&mut self, path: &Path) -> Result<MediaHandle>;

    /// Where decoded frames of the current media are drawn.
    fn attach_render_target(&mut self, target: FrameSink);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Halt and rewind to the start.
    fn stop(&mut self) -> Result<()>;

    /// `percent` is already within 0..=100.
    fn set_volume(&mut self, percent: u8) -> Result<()>;

    fn volume(&self) -> u8;

    fn set_rate(&mut self, rate: f64) -> Result<()>;

    fn seek_absolute(&mut self, position_ms: u64) -> Result<()>;

    fn length_ms(&self) -> Option<u64>;

    fn position_ms(&self) -> Option<u64>;

    /// Drain pending events without blocking.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
