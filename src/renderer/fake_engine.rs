//! In-memory engine used by unit tests. Records every call it receives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{PlayerError, Result};
use crate::renderer::frame_sink::FrameSink;
use crate::renderer::media_engine::{EngineEvent, MediaEngine};
use crate::types::media::MediaHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Open(PathBuf),
    AttachRenderTarget,
    Play,
    Pause,
    Stop,
    SetVolume(u8),
    SetRate(f64),
    SeekAbsolute(u64),
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    /// Files the engine can open, with their length (`None` for live-ish media).
    pub library: HashMap<PathBuf, Option<u64>>,
    pub calls: Vec<EngineCall>,
    pub current: Option<MediaHandle>,
    pub target: Option<FrameSink>,
    pub playing: bool,
    pub volume: u8,
    pub rate: f64,
    pub position_ms: u64,
    pub pending_events: Vec<EngineEvent>,
    pub fail_play: bool,
    /// Files are found but the new pipeline refuses to start.
    pub fail_preroll: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            volume: 100,
            rate: 1.0,
            ..Self::default()
        }
    }

    pub fn with_media(mut self, path: &str, length_ms: Option<u64>) -> Self {
        self.library.insert(PathBuf::from(path), length_ms);
        self
    }

    pub fn seeks(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::SeekAbsolute(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    fn require_media(&self) -> Result<()> {
        self.current.as_ref().map(|_| ()).ok_or(PlayerError::NoMediaLoaded)
    }
}

impl MediaEngine for FakeEngine {
    fn open(&mut self, path: &Path) -> Result<MediaHandle> {
        self.calls.push(EngineCall::Open(path.to_path_buf()));
        let length_ms = *self
            .library
            .get(path)
            .ok_or_else(|| PlayerError::Media(format!("{}: not found", path.display())))?;
        if self.fail_preroll {
            return Err(PlayerError::Engine("state change to Paused failed".to_string()));
        }
        let handle = MediaHandle::new(path, length_ms);
        self.current = Some(handle.clone());
        self.playing = false;
        self.position_ms = 0;
        Ok(handle)
    }

    fn attach_render_target(&mut self, target: FrameSink) {
        self.calls.push(EngineCall::AttachRenderTarget);
        self.target = Some(target);
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(EngineCall::Play);
        self.require_media()?;
        if self.fail_play {
            return Err(PlayerError::Engine("play refused".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(EngineCall::Pause);
        self.require_media()?;
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.calls.push(EngineCall::Stop);
        self.require_media()?;
        self.playing = false;
        self.position_ms = 0;
        Ok(())
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        self.calls.push(EngineCall::SetVolume(percent));
        self.volume = percent;
        Ok(())
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.calls.push(EngineCall::SetRate(rate));
        self.rate = rate;
        Ok(())
    }

    fn seek_absolute(&mut self, position_ms: u64) -> Result<()> {
        self.calls.push(EngineCall::SeekAbsolute(position_ms));
        self.require_media()?;
        self.position_ms = position_ms;
        Ok(())
    }

    fn length_ms(&self) -> Option<u64> {
        self.current.as_ref().and_then(|h| h.length_ms())
    }

    fn position_ms(&self) -> Option<u64> {
        self.current.as_ref().map(|_| self.position_ms)
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
