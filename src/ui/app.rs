use eframe::egui;

use crate::controller::PlayerController;
use crate::playback::pipeline::PipelineSurface;
use crate::types::surface::PlaybackSurface;
use crate::ui::player_panel::PlayerPanel;

pub struct PlayerApp {
    controller: PlayerController<PipelineSurface>,
    texture: Option<egui::TextureHandle>,
}

impl PlayerApp {
    pub fn new(controller: PlayerController<PipelineSurface>) -> Self {
        Self {
            controller,
            texture: None,
        }
    }

    /// Upload the latest tapped frame as an egui texture, if one arrived.
    fn update_texture(&mut self, ctx: &egui::Context) {
        if let Some(frame) = self.controller.surface().take_frame() {
            let color_img = egui::ColorImage::from_rgba_unmultiplied(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            self.texture = Some(ctx.load_texture(
                "video_frame",
                color_img,
                egui::TextureOptions::default(),
            ));
        }
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Mirror surface state into the visuals before drawing anything.
        let events = self.controller.surface_mut().poll_events();
        for event in events {
            self.controller.handle_event(event);
        }

        self.update_texture(ctx);

        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            PlayerPanel::show(ui, &mut self.controller);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                if let Some(texture) = &self.texture {
                    // Clicking the video itself also toggles playback.
                    let video = ui.add(
                        egui::Image::new(texture)
                            .shrink_to_fit()
                            .sense(egui::Sense::click()),
                    );
                    if video.clicked() {
                        self.controller.toggle_playback();
                    }
                } else {
                    ui.label("No frame loaded");
                }
            });
        });

        if !self.controller.surface().is_paused() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }
    }
}
