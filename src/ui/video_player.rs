use eframe::egui;

use crate::renderer::frame_sink::{FrameSink, VideoFrame};

/// The drawable area the engine renders into.
pub struct VideoSurface {
    sink: FrameSink,
    texture: Option<egui::TextureHandle>,
    seen_generation: u64,
}

impl VideoSurface {
    /// New frames wake the UI so playback repaints without polling.
    pub fn new(ctx: &egui::Context) -> Self {
        let ctx = ctx.clone();
        Self {
            sink: FrameSink::with_waker(move || ctx.request_repaint()),
            texture: None,
            seen_generation: 0,
        }
    }

    /// The handle passed to the engine as its render target.
    pub fn handle(&self) -> FrameSink {
        self.sink.clone()
    }

    /// Upload the newest frame, if there is one we have not shown yet.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let Some((generation, frame)) = self.sink.newer_than(self.seen_generation) else {
            return;
        };
        self.seen_generation = generation;
        match frame {
            Some(frame) => {
                let image = to_color_image(&frame);
                let options = egui::TextureOptions::LINEAR;
                match &mut self.texture {
                    Some(texture) => texture.set(image, options),
                    None => self.texture = Some(ctx.load_texture("video_frame", image, options)),
                }
            }
            None => self.texture = None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, placeholder: &str) {
        self.update_texture(ui.ctx());

        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

        match &self.texture {
            Some(texture) => {
                let target = fit_rect(texture.size_vec2(), rect);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), target, uv, egui::Color32::WHITE);
            }
            None => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    placeholder,
                    egui::FontId::proportional(18.0),
                    egui::Color32::GRAY,
                );
            }
        }
    }
}

fn to_color_image(frame: &VideoFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [frame.width as usize, frame.height as usize],
        &frame.data,
    )
}

/// Largest rect with the frame's aspect ratio centred inside `bounds`.
fn fit_rect(frame: egui::Vec2, bounds: egui::Rect) -> egui::Rect {
    if frame.x <= 0.0 || frame.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / frame.x).min(bounds.height() / frame.y);
    egui::Rect::from_center_size(bounds.center(), frame * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_letterboxes_wide_frames() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 800.0));
        let fitted = fit_rect(egui::vec2(1920.0, 1080.0), bounds);
        assert!((fitted.width() - 800.0).abs() < 0.01);
        assert!((fitted.height() - 450.0).abs() < 0.01);
        assert!((fitted.center() - bounds.center()).length() < 0.01);
    }

    #[test]
    fn test_fit_rect_pillarboxes_tall_frames() {
        let bounds = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(400.0, 200.0));
        let fitted = fit_rect(egui::vec2(100.0, 200.0), bounds);
        assert_eq!(fitted.size(), egui::vec2(100.0, 200.0));
    }

    #[test]
    fn test_surface_handle_is_shared() {
        let ctx = egui::Context::default();
        let surface = VideoSurface::new(&ctx);
        assert!(surface.handle().same_target(&surface.handle()));
    }
}
