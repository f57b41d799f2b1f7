use std::path::Path;

use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::ops::media_path::validate_media_path;
use crate::ops::playback_ops::{clamp_volume, progress_percent, seek_target_ms};
use crate::renderer::frame_sink::FrameSink;
use crate::renderer::media_engine::{EngineEvent, MediaEngine};
use crate::types::playback_state::{PlaybackRate, PlaybackState};
use crate::types::session::PlayerSession;

/// Where playback is, for the time slider and label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub position_ms: u64,
    pub length_ms: u64,
    pub percent: f64,
}

/// Translates UI requests into engine calls and keeps the session in step.
///
/// Every operation is synchronous and local: an error aborts only that
/// request and leaves the session as it was.
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    session: PlayerSession,
    surface: FrameSink,
    video_extensions: Vec<String>,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn new(engine: E, surface: FrameSink, config: &PlayerConfig) -> Self {
        let mut controller = Self {
            engine,
            session: PlayerSession::from_config(config),
            surface,
            video_extensions: config.video_extensions.clone(),
        };
        // The engine starts with its own defaults; make it agree with the session.
        let volume = controller.session.volume;
        if let Err(e) = controller.engine.set_volume(volume) {
            log::warn!("initial volume {} not applied: {}", volume, e);
        }
        controller
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn video_extensions(&self) -> &[String] {
        &self.video_extensions
    }

    fn require_media(&self) -> Result<()> {
        if self.session.state.has_media() {
            Ok(())
        } else {
            Err(PlayerError::NoMediaLoaded)
        }
    }

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        validate_media_path(path, &self.video_extensions)?;

        let handle = self.engine.open(path)?;
        log::info!("loaded {} as {}", handle.display_name(), handle.id());
        self.session.load(handle);
        self.engine.attach_render_target(self.surface.clone());

        // Settings outlive the media they were chosen for.
        self.engine.set_volume(self.session.volume)?;
        self.engine.set_rate(self.session.rate.as_f64())?;

        self.engine.play()?;
        self.session.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn play(&mut self) -> Result<()> {
        self.require_media()?;
        if self.session.state == PlaybackState::Playing {
            return Ok(());
        }
        self.engine.play()?;
        log::info!("play ({:?} -> Playing)", self.session.state);
        self.session.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.require_media()?;
        if self.session.state != PlaybackState::Playing {
            log::debug!("pause ignored in {:?}", self.session.state);
            return Ok(());
        }
        self.engine.pause()?;
        log::info!("pause");
        self.session.state = PlaybackState::Paused;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.session.state {
            PlaybackState::Empty | PlaybackState::Stopped => Ok(()),
            _ => {
                self.engine.stop()?;
                log::info!("stop");
                self.session.state = PlaybackState::Stopped;
                Ok(())
            }
        }
    }

    /// Out-of-range input is clamped, never rejected.
    pub fn set_volume(&mut self, volume: i32) -> Result<()> {
        let volume = clamp_volume(volume);
        self.engine.set_volume(volume)?;
        self.session.volume = volume;
        Ok(())
    }

    /// `percent` is a time slider position in 0..=100.
    pub fn seek(&mut self, percent: f64) -> Result<()> {
        self.require_media()?;
        let target = seek_target_ms(percent, self.engine.length_ms())
            .ok_or(PlayerError::IndeterminateLength)?;
        log::debug!("seek {:.1}% -> {} ms", percent, target);
        self.engine.seek_absolute(target)
    }

    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        let rate = PlaybackRate::try_from(rate)?;
        self.engine.set_rate(rate.as_f64())?;
        log::info!("rate {}", rate);
        self.session.rate = rate;
        Ok(())
    }

    /// Returns the new fullscreen flag; applying it is up to the window.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.session.fullscreen = !self.session.fullscreen;
        self.session.fullscreen
    }

    /// Handle whatever the engine reported since the last frame.
    /// Returns errors the user should see.
    pub fn tick(&mut self) -> Vec<PlayerError> {
        let mut errors = Vec::new();
        for event in self.engine.poll_events() {
            match event {
                EngineEvent::EndOfStream => {
                    if let Err(e) = self.engine.stop() {
                        log::warn!("rewind after end of stream failed: {}", e);
                    }
                    self.session.state = PlaybackState::Stopped;
                }
                EngineEvent::Error(message) => errors.push(PlayerError::Media(message)),
            }
        }
        errors
    }

    pub fn progress(&self) -> Option<Progress> {
        if !self.session.state.has_media() {
            return None;
        }
        let length_ms = self.engine.length_ms()?;
        let position_ms = self.engine.position_ms()?;
        let percent = progress_percent(position_ms, length_ms)?;
        Some(Progress {
            position_ms,
            length_ms,
            percent,
        })
    }
}
