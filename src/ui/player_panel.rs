use eframe::egui;

use crate::controller::PlayerController;
use crate::types::controls::ControlEffect;
use crate::types::surface::PlaybackSurface;

const TRACK_HEIGHT: f32 = 14.0;
const FILL_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 198, 0);

/// The control strip: toggle button, configured skip buttons and
/// sliders, and the scrubbable progress track.
pub struct PlayerPanel;

impl PlayerPanel {
    pub fn show<S: PlaybackSurface>(ui: &mut egui::Ui, controller: &mut PlayerController<S>) {
        ui.horizontal(|ui| {
            if ui.button(controller.toggle_label()).clicked() {
                controller.toggle_playback();
            }

            for button in controller.config().buttons.clone() {
                let ControlEffect::Skip { delta } = button.effect else {
                    continue;
                };
                if ui.button(&button.label).clicked() {
                    controller.skip(delta);
                }
            }

            ui.separator();

            for slider in controller.config().sliders.clone() {
                let mut value = match slider.target {
                    crate::types::controls::SliderTarget::Volume => controller.surface().volume(),
                    crate::types::controls::SliderTarget::PlaybackRate => {
                        controller.surface().playback_rate()
                    }
                };
                // `changed()` fires on every drag motion, which covers both
                // the committed change and the live-feedback source.
                if ui
                    .add(
                        egui::Slider::new(&mut value, slider.min..=slider.max)
                            .text(&slider.label)
                            .show_value(false),
                    )
                    .changed()
                {
                    controller.apply_slider_value(slider.target, value);
                }
            }
        });

        ui.add_space(4.0);
        Self::show_progress_track(ui, controller);
    }

    fn show_progress_track<S: PlaybackSurface>(
        ui: &mut egui::Ui,
        controller: &mut PlayerController<S>,
    ) {
        let desired = egui::vec2(ui.available_width(), TRACK_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 3.0, ui.style().visuals.extreme_bg_color);
        let fill_width = rect.width() * controller.fill_percent() / 100.0;
        if fill_width > 0.0 {
            let fill_rect =
                egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
            painter.rect_filled(fill_rect, 3.0, FILL_COLOR);
        }

        let pointer_pos = ui.input(|i| i.pointer.latest_pos());
        let pointer_moved = ui.input(|i| i.pointer.delta() != egui::Vec2::ZERO);
        let on_track = pointer_pos.is_some_and(|pos| rect.contains(pos));

        if on_track && ui.input(|i| i.pointer.primary_pressed()) {
            controller.set_seeking(true);
        }
        if ui.input(|i| i.pointer.primary_released()) {
            controller.set_seeking(false);
        }
        // A drag that exits the track must not keep seeking.
        if pointer_pos.is_some() && !on_track {
            controller.set_seeking(false);
        }

        if let Some(pos) = pointer_pos {
            if on_track && pointer_moved {
                controller.scrub(f64::from(pos.x - rect.left()), f64::from(rect.width()));
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                controller.click_scrub(f64::from(pos.x - rect.left()), f64::from(rect.width()));
            }
        }
    }
}
