use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::PlayerConfig;
use crate::controller::PlaybackController;
use crate::renderer::media_engine::MediaEngine;
use crate::ui::controls::ControlBar;
use crate::ui::events::{ShellCommand, UiEvent, dispatch};
use crate::ui::video_player::VideoSurface;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

struct Notice {
    message: String,
    shown_at: Instant,
}

pub struct PlayerApp<E: MediaEngine> {
    controller: PlaybackController<E>,
    surface: VideoSurface,
    controls: ControlBar,
    notice: Option<Notice>,
}

impl<E: MediaEngine> PlayerApp<E> {
    pub fn new(cc: &eframe::CreationContext<'_>, engine: E, config: &PlayerConfig) -> Self {
        let surface = VideoSurface::new(&cc.egui_ctx);
        let controller = PlaybackController::new(engine, surface.handle(), config);
        Self {
            controller,
            surface,
            controls: ControlBar::default(),
            notice: None,
        }
    }

    fn notify(&mut self, message: String) {
        self.notice = Some(Notice {
            message,
            shown_at: Instant::now(),
        });
    }

    /// Run events through the dispatch table, then carry out what it asks of the window.
    fn handle(&mut self, ctx: &egui::Context, events: Vec<UiEvent>) {
        let mut queue = events;
        while !queue.is_empty() {
            let mut follow_up = Vec::new();
            for event in queue {
                match dispatch(&mut self.controller, event) {
                    Some(ShellCommand::PickFile { extensions }) => {
                        let picked = rfd::FileDialog::new()
                            .add_filter("Video files", extensions.as_slice())
                            .pick_file();
                        follow_up.push(UiEvent::FileChosen(picked));
                    }
                    Some(ShellCommand::SetFullscreen(fullscreen)) => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
                    }
                    Some(ShellCommand::Notify(message)) => self.notify(message),
                    None => {}
                }
            }
            queue = follow_up;
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        if notice.shown_at.elapsed() > NOTICE_TIMEOUT {
            self.notice = None;
            return;
        }
        let mut dismissed = false;
        egui::Area::new(egui::Id::new("media_error_notice"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(ui.visuals().error_fg_color, &notice.message);
                        if ui.small_button("✖").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });
        if dismissed {
            self.notice = None;
        } else {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

impl<E: MediaEngine> eframe::App for PlayerApp<E> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for error in self.controller.tick() {
            log::error!("playback error: {}", error);
            self.notify(error.to_string());
        }

        let mut events = Vec::new();
        if ctx.input(|i| i.key_pressed(egui::Key::F)) {
            events.push(UiEvent::ToggleFullscreen);
        }

        let progress = self.controller.progress();
        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            self.controls
                .show(ui, self.controller.session(), progress, &mut events);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.surface.show(ui, "Open a video to start playback");
            });

        self.show_notice(ctx);
        self.handle(ctx, events);

        // Keep the time slider moving even when frames stall (e.g. audio-only files).
        if self.controller.session().state.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
