use eframe::egui;

use crate::controller::Progress;
use crate::ops::playback_ops::format_timestamp;
use crate::types::playback_state::{PlaybackRate, PlaybackState};
use crate::types::session::PlayerSession;
use crate::ui::events::UiEvent;

/// Bottom control bar. Widgets only emit events; nothing here touches the engine.
#[derive(Default)]
pub struct ControlBar {
    /// Slider value while the user is dragging, so playback does not yank it back.
    scrub: Option<f64>,
}

impl ControlBar {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        session: &PlayerSession,
        progress: Option<Progress>,
        events: &mut Vec<UiEvent>,
    ) {
        ui.horizontal(|ui| {
            let mut time = self.scrub.unwrap_or_else(|| progress.map_or(0.0, |p| p.percent));
            ui.spacing_mut().slider_width = (ui.available_width() - 120.0).max(100.0);
            let response = ui.add_enabled(
                session.state.has_media(),
                egui::Slider::new(&mut time, 0.0..=100.0).show_value(false),
            );
            if response.dragged() {
                self.scrub = Some(time);
            }
            if response.drag_stopped() || (response.changed() && !response.dragged()) {
                self.scrub = None;
                events.push(UiEvent::Seek(time));
            }

            let label = match progress {
                Some(p) => format!(
                    "{} / {}",
                    format_timestamp(p.position_ms),
                    format_timestamp(p.length_ms)
                ),
                None => "--:-- / --:--".to_string(),
            };
            ui.label(label);
        });

        ui.horizontal(|ui| {
            let playing = session.state.is_playing();
            if ui.add_enabled(!playing, egui::Button::new("▶")).on_hover_text("Play").clicked() {
                events.push(UiEvent::Play);
            }
            if ui.add_enabled(playing, egui::Button::new("⏸")).on_hover_text("Pause").clicked() {
                events.push(UiEvent::Pause);
            }
            let stoppable = !matches!(session.state, PlaybackState::Empty | PlaybackState::Stopped);
            if ui.add_enabled(stoppable, egui::Button::new("⏹")).on_hover_text("Stop").clicked() {
                events.push(UiEvent::Stop);
            }
            if ui.button("🗁").on_hover_text("Open video").clicked() {
                events.push(UiEvent::OpenDialog);
            }

            ui.separator();
            ui.label("Volume:");
            let mut volume = session.volume as i32;
            if ui
                .add(egui::Slider::new(&mut volume, 0..=100).show_value(true))
                .changed()
            {
                events.push(UiEvent::Volume(volume));
            }

            ui.separator();
            egui::ComboBox::from_label("Speed")
                .selected_text(session.rate.to_string())
                .show_ui(ui, |ui| {
                    for rate in PlaybackRate::ALL {
                        if ui
                            .selectable_label(session.rate == rate, rate.to_string())
                            .clicked()
                        {
                            events.push(UiEvent::Rate(rate.as_f64()));
                        }
                    }
                });

            if let Some(media) = &session.media {
                ui.separator();
                let mut caption = media.display_name();
                if let Some(meta) = media.metadata() {
                    caption.push_str(&format!("  {}x{}", meta.resolution.0, meta.resolution.1));
                }
                ui.label(egui::RichText::new(caption).color(egui::Color32::GRAY))
                    .on_hover_text(media.path().display().to_string());
            }
        });
    }
}
