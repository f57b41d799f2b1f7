use std::path::PathBuf;

use crate::controller::PlaybackController;
use crate::error::{PlayerError, Result};
use crate::renderer::media_engine::MediaEngine;

/// Everything the window can ask of the player.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    OpenDialog,
    /// Outcome of the open dialog; `None` when cancelled.
    FileChosen(Option<PathBuf>),
    Play,
    Pause,
    Stop,
    Volume(i32),
    Seek(f64),
    Rate(f64),
    ToggleFullscreen,
}

/// What the player needs back from the window.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    PickFile { extensions: Vec<String> },
    SetFullscreen(bool),
    Notify(String),
}

/// Route one event to its handler.
///
/// Errors never escape: user-facing ones become a notification, the rest are logged.
pub fn dispatch<E: MediaEngine>(
    controller: &mut PlaybackController<E>,
    event: UiEvent,
) -> Option<ShellCommand> {
    match event {
        UiEvent::OpenDialog => Some(ShellCommand::PickFile {
            extensions: controller.video_extensions().to_vec(),
        }),
        UiEvent::FileChosen(None) => {
            settle("open", Err(PlayerError::InvalidPath("selection cancelled".to_string())))
        }
        UiEvent::FileChosen(Some(path)) => settle("open", controller.open_file(&path)),
        UiEvent::Play => settle("play", controller.play()),
        UiEvent::Pause => settle("pause", controller.pause()),
        UiEvent::Stop => settle("stop", controller.stop()),
        UiEvent::Volume(volume) => settle("volume", controller.set_volume(volume)),
        UiEvent::Seek(percent) => settle("seek", controller.seek(percent)),
        UiEvent::Rate(rate) => settle("rate", controller.set_rate(rate)),
        UiEvent::ToggleFullscreen => {
            Some(ShellCommand::SetFullscreen(controller.toggle_fullscreen()))
        }
    }
}

fn settle(action: &str, result: Result<()>) -> Option<ShellCommand> {
    match result {
        Ok(()) => None,
        Err(e) if e.is_user_facing() => {
            log::error!("{} failed: {}", action, e);
            Some(ShellCommand::Notify(e.to_string()))
        }
        Err(e @ PlayerError::UnsupportedRate(_)) => {
            log::warn!("{} rejected: {}", action, e);
            None
        }
        Err(e) => {
            log::debug!("{} ignored: {}", action, e);
            None
        }
    }
}
