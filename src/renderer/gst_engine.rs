//! GStreamer-backed media engine.
//!
//! Playback runs through a `playbin` whose video sink is an RGBA `appsink`.
//! Decoded frames are copied into the attached [`FrameSink`] from the
//! streaming thread; everything else happens on the caller's thread.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_pbutils as gst_pbutils;
use gstreamer_pbutils::prelude::*;
use gstreamer_video as gst_video;

use crate::error::{PlayerError, Result};
use crate::renderer::frame_sink::{FrameSink, VideoFrame};
use crate::renderer::media_engine::{EngineEvent, MediaEngine};
use crate::types::media::{MediaHandle, VideoMetadata};

type SharedTarget = Arc<Mutex<Option<FrameSink>>>;

pub struct GstEngine {
    playbin: Option<gst::Element>,
    handle: Option<MediaHandle>,
    target: SharedTarget,
    discover_timeout: gst::ClockTime,
    volume: u8,
    rate: f64,
    /// Set once the current pipeline has prerolled; rate seeks fail before that.
    prerolled: bool,
    /// Whether the user wants motion, independent of a frozen (0x) rate.
    wants_playing: bool,
    /// Seek requested before preroll, applied on the first `AsyncDone`.
    pending_seek: Option<gst::ClockTime>,
}

/// Pipeline state a rate change calls for, if any.
///
/// 0x pauses in place; leaving 0x resumes only if playback was wanted.
fn state_for_rate(wants_playing: bool, old_rate: f64, new_rate: f64) -> Option<gst::State> {
    if new_rate <= 0.0 {
        Some(gst::State::Paused)
    } else if old_rate <= 0.0 && wants_playing {
        Some(gst::State::Playing)
    } else {
        None
    }
}

/// Pipeline state a play request calls for. At 0x the frame is held.
fn state_for_play(rate: f64) -> Option<gst::State> {
    (rate > 0.0).then_some(gst::State::Playing)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PrerollSeek {
    Nothing,
    /// Re-seek in place so a non-default rate takes effect.
    InPlace,
    To(gst::ClockTime),
}

/// The seek owed once the pipeline first prerolls.
fn seek_after_preroll(rate: f64, pending: Option<gst::ClockTime>) -> PrerollSeek {
    match pending {
        Some(position) => PrerollSeek::To(position),
        None if rate > 0.0 && rate != 1.0 => PrerollSeek::InPlace,
        None => PrerollSeek::Nothing,
    }
}

impl GstEngine {
    /// Initialise GStreamer and check for the elements playback depends on.
    pub fn new(discover_timeout: Duration) -> Result<Self> {
        gst::init()?;
        log::info!("GStreamer version: {}", gst::version_string());

        let missing: Vec<&str> = ["playbin", "appsink", "videoconvert"]
            .into_iter()
            .filter(|name| gst::ElementFactory::find(name).is_none())
            .collect();
        if !missing.is_empty() {
            log::warn!("missing GStreamer elements: {:?}; playback may fail", missing);
        }

        Ok(Self {
            playbin: None,
            handle: None,
            target: Arc::default(),
            discover_timeout: gst::ClockTime::from_mseconds(discover_timeout.as_millis() as u64),
            volume: 100,
            rate: 1.0,
            prerolled: false,
            wants_playing: false,
            pending_seek: None,
        })
    }

    fn playbin(&self) -> Result<&gst::Element> {
        self.playbin.as_ref().ok_or(PlayerError::NoMediaLoaded)
    }

    /// Probe the file before touching the running pipeline.
    fn discover(&self, uri: &str, path: &Path) -> Result<MediaHandle> {
        let discoverer = gst_pbutils::Discoverer::new(self.discover_timeout)?;
        let info = discoverer
            .discover_uri(uri)
            .map_err(|e| PlayerError::Media(format!("{}: {}", path.display(), e)))?;
        if info.result() != gst_pbutils::DiscovererResult::Ok {
            return Err(PlayerError::Media(format!(
                "{}: {:?}",
                path.display(),
                info.result()
            )));
        }

        let length_ms = info.duration().map(|d| d.mseconds());
        let mut handle = MediaHandle::new(path, length_ms);
        if let Some(video) = info.video_streams().first() {
            let fps = video.framerate();
            let frame_rate = if fps.denom() != 0 {
                fps.numer() as f64 / fps.denom() as f64
            } else {
                0.0
            };
            let codec = video
                .caps()
                .and_then(|caps| caps.structure(0).map(|s| s.name().to_string()))
                .unwrap_or_default();
            handle = handle.with_metadata(VideoMetadata {
                resolution: (video.width(), video.height()),
                frame_rate,
                codec,
            });
        }
        Ok(handle)
    }

    fn build_playbin(&self, uri: &str) -> Result<gst::Element> {
        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let appsink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let target = self.target.clone();
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gst::FlowError::Error)?;
                    let info =
                        gst_video::VideoInfo::from_caps(caps).map_err(|_| gst::FlowError::Error)?;
                    let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;
                    let timestamp = buffer
                        .pts()
                        .map(|pts| pts.nseconds() as f64 / 1_000_000_000.0)
                        .unwrap_or_default();

                    let frame = VideoFrame::from_strided(
                        map.as_slice(),
                        info.width(),
                        info.height(),
                        info.stride()[0] as usize,
                        timestamp,
                    )
                    .ok_or(gst::FlowError::Error)?;

                    let target = target.lock().unwrap_or_else(|p| p.into_inner());
                    if let Some(target) = target.as_ref() {
                        target.push(frame);
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri)
            .property("video-sink", &appsink)
            .property("volume", self.volume as f64 / 100.0)
            .build()?;
        Ok(playbin)
    }

    /// Playback never seeks at 0x; a frozen pipeline is simply paused.
    fn seek_rate(&self) -> f64 {
        if self.rate > 0.0 { self.rate } else { 1.0 }
    }

    fn seek_to(&self, position: gst::ClockTime) -> Result<()> {
        self.playbin()?.seek(
            self.seek_rate(),
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            position,
            gst::SeekType::End,
            gst::ClockTime::ZERO,
        )?;
        Ok(())
    }

    fn apply_rate(&self) -> Result<()> {
        if !self.prerolled || self.rate <= 0.0 {
            return Ok(());
        }
        let position = self
            .playbin()?
            .query_position::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO);
        self.seek_to(position)
    }

    fn teardown(&mut self) {
        if let Some(playbin) = self.playbin.take() {
            if let Err(e) = playbin.set_state(gst::State::Null) {
                log::warn!("failed to release pipeline: {}", e);
            }
        }
    }
}

impl MediaEngine for GstEngine {
    fn open(&mut self, path: &Path) -> Result<MediaHandle> {
        let uri = gst::glib::filename_to_uri(path, None)
            .map_err(|e| PlayerError::Media(format!("{}: {}", path.display(), e)))?;
        let handle = self.discover(&uri, path)?;
        let playbin = self.build_playbin(&uri)?;

        if let Err(e) = playbin.set_state(gst::State::Paused) {
            if let Err(release) = playbin.set_state(gst::State::Null) {
                log::warn!("failed to release rejected pipeline: {}", release);
            }
            return Err(e.into());
        }

        // Only now is the previous media superseded.
        self.teardown();
        self.playbin = Some(playbin);
        self.handle = Some(handle.clone());
        self.prerolled = false;
        self.wants_playing = false;
        self.pending_seek = None;
        log::info!("opened {} ({:?} ms)", path.display(), handle.length_ms());
        Ok(handle)
    }

    fn attach_render_target(&mut self, target: FrameSink) {
        target.clear();
        let mut slot = self.target.lock().unwrap_or_else(|p| p.into_inner());
        *slot = Some(target);
    }

    fn play(&mut self) -> Result<()> {
        self.wants_playing = true;
        let playbin = self.playbin()?;
        match state_for_play(self.rate) {
            Some(state) => {
                playbin.set_state(state)?;
            }
            None => log::debug!("play requested at 0x, holding frame"),
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.wants_playing = false;
        self.playbin()?.set_state(gst::State::Paused)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.wants_playing = false;
        self.pending_seek = None;
        let playbin = self.playbin()?;
        if self.prerolled {
            playbin.set_state(gst::State::Paused)?;
            self.seek_to(gst::ClockTime::ZERO)
        } else {
            playbin.set_state(gst::State::Ready)?;
            Ok(())
        }
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        self.volume = percent.min(100);
        if let Some(playbin) = &self.playbin {
            playbin.set_property("volume", self.volume as f64 / 100.0);
        }
        Ok(())
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_rate(&mut self, rate: f64) -> Result<()> {
        let old_rate = self.rate;
        self.rate = rate;
        let Some(playbin) = &self.playbin else {
            return Ok(());
        };
        let next = state_for_rate(self.wants_playing, old_rate, rate);
        if next == Some(gst::State::Paused) {
            playbin.set_state(gst::State::Paused)?;
            return Ok(());
        }
        self.apply_rate()?;
        if let Some(state) = next {
            playbin.set_state(state)?;
        }
        Ok(())
    }

    fn seek_absolute(&mut self, position_ms: u64) -> Result<()> {
        let position = gst::ClockTime::from_mseconds(position_ms);
        self.playbin()?;
        if !self.prerolled {
            log::debug!("holding seek to {} until preroll", position);
            self.pending_seek = Some(position);
            return Ok(());
        }
        self.seek_to(position)
    }

    fn length_ms(&self) -> Option<u64> {
        self.playbin
            .as_ref()
            .and_then(|p| p.query_duration::<gst::ClockTime>())
            .map(|d| d.mseconds())
            .or_else(|| self.handle.as_ref().and_then(|h| h.length_ms()))
    }

    fn position_ms(&self) -> Option<u64> {
        self.playbin
            .as_ref()
            .and_then(|p| p.query_position::<gst::ClockTime>())
            .map(|p| p.mseconds())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let Some(bus) = self.playbin.as_ref().and_then(|p| p.bus()) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while let Some(msg) = bus.pop() {
            use gst::MessageView;

            match msg.view() {
                MessageView::Eos(..) => {
                    log::info!("end of stream");
                    events.push(EngineEvent::EndOfStream);
                }
                MessageView::Error(err) => {
                    log::error!(
                        "error from {:?}: {} ({:?})",
                        err.src().map(|s| s.path_string()),
                        err.error(),
                        err.debug()
                    );
                    events.push(EngineEvent::Error(err.error().to_string()));
                }
                MessageView::Warning(warning) => {
                    log::warn!(
                        "warning from {:?}: {} ({:?})",
                        warning.src().map(|s| s.path_string()),
                        warning.error(),
                        warning.debug()
                    );
                }
                MessageView::AsyncDone(..) => {
                    if !self.prerolled {
                        self.prerolled = true;
                        let result = match seek_after_preroll(self.rate, self.pending_seek.take()) {
                            PrerollSeek::Nothing => Ok(()),
                            PrerollSeek::InPlace => self.apply_rate(),
                            PrerollSeek::To(position) => self.seek_to(position),
                        };
                        if let Err(e) = result {
                            log::warn!("deferred seek failed: {}", e);
                        }
                    }
                }
                _ => {}
            }
        }
        events
    }
}

impl Drop for GstEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_pauses_in_place() {
        assert_eq!(state_for_rate(true, 1.0, 0.0), Some(gst::State::Paused));
        assert_eq!(state_for_rate(false, 2.0, 0.0), Some(gst::State::Paused));
    }

    #[test]
    fn test_unfreeze_resumes_only_when_playback_wanted() {
        assert_eq!(state_for_rate(true, 0.0, 1.5), Some(gst::State::Playing));
        // Paused explicitly while frozen: stay paused.
        assert_eq!(state_for_rate(false, 0.0, 1.5), None);
    }

    #[test]
    fn test_rate_change_between_speeds_keeps_state() {
        assert_eq!(state_for_rate(true, 1.0, 2.0), None);
        assert_eq!(state_for_rate(false, 0.5, 1.0), None);
    }

    #[test]
    fn test_play_while_frozen_holds_frame() {
        assert_eq!(state_for_play(0.0), None);
        assert_eq!(state_for_play(0.5), Some(gst::State::Playing));
    }

    #[test]
    fn test_seek_after_preroll() {
        let target = gst::ClockTime::from_mseconds(60_000);
        assert_eq!(seek_after_preroll(1.0, Some(target)), PrerollSeek::To(target));
        assert_eq!(seek_after_preroll(0.0, Some(target)), PrerollSeek::To(target));
        assert_eq!(seek_after_preroll(2.0, None), PrerollSeek::InPlace);
        assert_eq!(seek_after_preroll(1.0, None), PrerollSeek::Nothing);
        assert_eq!(seek_after_preroll(0.0, None), PrerollSeek::Nothing);
    }
}
