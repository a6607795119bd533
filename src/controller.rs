use crate::types::controls::{ControlsConfig, SliderTarget};
use crate::types::surface::{PlaybackSurface, SurfaceEvent};

/// Glyph shown on the toggle button while playback is paused.
pub const PLAY_GLYPH: &str = "►";
/// Glyph shown on the toggle button while playback is running.
pub const PAUSE_GLYPH: &str = "❚ ❚";

/// Translates control-surface input into playback mutations and mirrors
/// surface state back into the derived visuals (toggle glyph, progress
/// fill). The surface and the control layout are both injected at
/// construction, so the controller has no implicit global context.
pub struct PlayerController<S: PlaybackSurface> {
    surface: S,
    config: ControlsConfig,
    /// True only while the pointer is held down over the progress track.
    is_seeking: bool,
    toggle_label: &'static str,
    fill: f32,
}

impl<S: PlaybackSurface> PlayerController<S> {
    pub fn new(surface: S, config: ControlsConfig) -> Self {
        let mut controller = Self {
            surface,
            config,
            is_seeking: false,
            toggle_label: PLAY_GLYPH,
            fill: 0.0,
        };
        controller.reflect_playback_state();
        controller.reflect_progress();
        controller
    }

    /// If the surface is paused, start playback; otherwise pause it. The
    /// toggle glyph is not touched here: it follows the surface's own
    /// Play/Pause notifications through `handle_event`.
    pub fn toggle_playback(&mut self) {
        if self.surface.is_paused() {
            self.surface.play();
        } else {
            self.surface.pause();
        }
    }

    /// Recompute the toggle glyph from the surface's actual paused flag.
    pub fn reflect_playback_state(&mut self) {
        self.toggle_label = if self.surface.is_paused() {
            PLAY_GLYPH
        } else {
            PAUSE_GLYPH
        };
    }

    /// Write a slider value through to the bound surface property. Range
    /// enforcement belongs to the slider itself.
    pub fn apply_slider_value(&mut self, target: SliderTarget, value: f64) {
        match target {
            SliderTarget::Volume => self.surface.set_volume(value),
            SliderTarget::PlaybackRate => self.surface.set_playback_rate(value),
        }
    }

    /// Jump by a fixed offset in seconds. The surface clamps the result
    /// to `[0, duration]`; non-finite deltas are dropped here so a bad
    /// config cannot poison the clock.
    pub fn skip(&mut self, delta_seconds: f64) {
        if !delta_seconds.is_finite() {
            return;
        }
        let target = self.surface.current_time() + delta_seconds;
        self.surface.set_current_time(target);
    }

    /// Recompute the progress fill ratio. A zero or not-yet-known
    /// duration reads as 0% rather than letting NaN reach the visuals.
    pub fn reflect_progress(&mut self) {
        let ratio = self.surface.current_time() / self.surface.duration();
        self.fill = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
    }

    /// Drag-scrub: seek to the pointer's fraction of the track, but only
    /// while the pointer is held down over it.
    pub fn scrub(&mut self, pointer_offset_x: f64, track_width: f64) {
        if !self.is_seeking {
            return;
        }
        self.seek_to_fraction(pointer_offset_x, track_width);
    }

    /// A direct click on the track is an immediate single-point scrub,
    /// independent of the held-state flag.
    pub fn click_scrub(&mut self, pointer_offset_x: f64, track_width: f64) {
        self.seek_to_fraction(pointer_offset_x, track_width);
    }

    /// Set on pointer-down, cleared on pointer-up and on the pointer
    /// leaving the track, so a drag that exits the element cannot keep
    /// seeking.
    pub fn set_seeking(&mut self, seeking: bool) {
        self.is_seeking = seeking;
    }

    /// Dispatch a surface notification to the derived visuals.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Play | SurfaceEvent::Pause => self.reflect_playback_state(),
            SurfaceEvent::TimeUpdate => self.reflect_progress(),
        }
    }

    fn seek_to_fraction(&mut self, pointer_offset_x: f64, track_width: f64) {
        if track_width <= 0.0 || !pointer_offset_x.is_finite() {
            return;
        }
        let fraction = (pointer_offset_x / track_width).clamp(0.0, 1.0);
        let target = fraction * self.surface.duration();
        self.surface.set_current_time(target);
    }

    pub fn toggle_label(&self) -> &'static str {
        self.toggle_label
    }

    /// Progress fill as a percentage in `[0, 100]`.
    pub fn fill_percent(&self) -> f32 {
        self.fill * 100.0
    }

    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory surface that records transport calls and clamps seeks
    /// the way a real backend does.
    struct MockSurface {
        paused: bool,
        current_time: f64,
        duration: f64,
        volume: f64,
        playback_rate: f64,
        play_calls: usize,
        pause_calls: usize,
    }

    impl MockSurface {
        fn with_duration(duration: f64) -> Self {
            Self {
                paused: true,
                current_time: 0.0,
                duration,
                volume: 1.0,
                playback_rate: 1.0,
                play_calls: 0,
                pause_calls: 0,
            }
        }
    }

    impl PlaybackSurface for MockSurface {
        fn play(&mut self) {
            self.play_calls += 1;
            self.paused = false;
        }

        fn pause(&mut self) {
            self.pause_calls += 1;
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn current_time(&self) -> f64 {
            self.current_time
        }

        fn set_current_time(&mut self, time: f64) {
            self.current_time = time.clamp(0.0, self.duration);
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn volume(&self) -> f64 {
            self.volume
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }

        fn playback_rate(&self) -> f64 {
            self.playback_rate
        }

        fn set_playback_rate(&mut self, rate: f64) {
            self.playback_rate = rate;
        }
    }

    fn controller_with_duration(duration: f64) -> PlayerController<MockSurface> {
        PlayerController::new(MockSurface::with_duration(duration), ControlsConfig::default())
    }

    #[test]
    fn toggle_label_matches_paused_flag() {
        let mut controller = controller_with_duration(120.0);

        controller.surface_mut().paused = true;
        controller.reflect_playback_state();
        assert_eq!(controller.toggle_label(), PLAY_GLYPH);

        controller.surface_mut().paused = false;
        controller.reflect_playback_state();
        assert_eq!(controller.toggle_label(), PAUSE_GLYPH);
    }

    #[test]
    fn toggle_on_paused_surface_plays_exactly_once() {
        let mut controller = controller_with_duration(120.0);

        controller.toggle_playback();
        assert_eq!(controller.surface().play_calls, 1);
        assert_eq!(controller.surface().pause_calls, 0);

        controller.toggle_playback();
        assert_eq!(controller.surface().play_calls, 1);
        assert_eq!(controller.surface().pause_calls, 1);
    }

    #[test]
    fn skip_moves_by_fixed_delta() {
        let mut controller = controller_with_duration(120.0);

        controller.surface_mut().current_time = 15.0;
        controller.skip(-10.0);
        assert_eq!(controller.surface().current_time, 5.0);

        controller.skip(25.0);
        assert_eq!(controller.surface().current_time, 30.0);
    }

    #[test]
    fn skip_is_clamped_by_the_surface() {
        let mut controller = controller_with_duration(40.0);

        controller.surface_mut().current_time = 30.0;
        controller.skip(25.0);
        assert_eq!(controller.surface().current_time, 40.0);

        controller.skip(-100.0);
        assert_eq!(controller.surface().current_time, 0.0);
    }

    #[test]
    fn non_finite_skip_delta_is_ignored() {
        let mut controller = controller_with_duration(120.0);
        controller.surface_mut().current_time = 15.0;

        controller.skip(f64::NAN);
        controller.skip(f64::INFINITY);
        assert_eq!(controller.surface().current_time, 15.0);
    }

    #[test]
    fn progress_fill_is_ratio_of_duration() {
        let mut controller = controller_with_duration(120.0);

        controller.surface_mut().current_time = 30.0;
        controller.reflect_progress();
        assert_eq!(controller.fill_percent(), 25.0);
    }

    #[test]
    fn zero_duration_reads_as_zero_fill_not_nan() {
        let mut controller = controller_with_duration(0.0);

        controller.surface_mut().current_time = 0.0;
        controller.reflect_progress();
        assert_eq!(controller.fill_percent(), 0.0);
        assert!(controller.fill_percent().is_finite());
    }

    #[test]
    fn scrub_seeks_only_while_pointer_is_held() {
        let mut controller = controller_with_duration(120.0);

        controller.set_seeking(true);
        controller.scrub(50.0, 200.0);
        assert_eq!(controller.surface().current_time, 30.0);

        controller.surface_mut().current_time = 0.0;
        controller.set_seeking(false);
        controller.scrub(50.0, 200.0);
        assert_eq!(controller.surface().current_time, 0.0);
    }

    #[test]
    fn click_scrub_ignores_the_held_flag() {
        let mut controller = controller_with_duration(120.0);

        assert!(!controller.is_seeking());
        controller.click_scrub(60.0, 120.0);
        assert_eq!(controller.surface().current_time, 60.0);
    }

    #[test]
    fn pointer_leaving_track_stops_the_drag() {
        let mut controller = controller_with_duration(120.0);

        controller.set_seeking(true); // pointerdown
        assert!(controller.is_seeking());
        controller.set_seeking(false); // pointerleave
        assert!(!controller.is_seeking());

        controller.scrub(50.0, 200.0); // pointermove after leaving
        assert_eq!(controller.surface().current_time, 0.0);
    }

    #[test]
    fn zero_width_track_does_not_seek() {
        let mut controller = controller_with_duration(120.0);

        controller.set_seeking(true);
        controller.scrub(50.0, 0.0);
        assert_eq!(controller.surface().current_time, 0.0);
    }

    #[test]
    fn surface_events_drive_the_derived_visuals() {
        let mut controller = controller_with_duration(120.0);

        // External play: the glyph follows the event, not the input path.
        controller.surface_mut().paused = false;
        controller.handle_event(SurfaceEvent::Play);
        assert_eq!(controller.toggle_label(), PAUSE_GLYPH);

        controller.surface_mut().paused = true;
        controller.handle_event(SurfaceEvent::Pause);
        assert_eq!(controller.toggle_label(), PLAY_GLYPH);

        controller.surface_mut().current_time = 60.0;
        controller.handle_event(SurfaceEvent::TimeUpdate);
        assert_eq!(controller.fill_percent(), 50.0);
    }

    #[test]
    fn slider_values_land_on_the_bound_property() {
        let mut controller = controller_with_duration(120.0);

        controller.apply_slider_value(SliderTarget::Volume, 0.3);
        assert_eq!(controller.surface().volume, 0.3);
        assert_eq!(controller.surface().playback_rate, 1.0);

        controller.apply_slider_value(SliderTarget::PlaybackRate, 1.5);
        assert_eq!(controller.surface().playback_rate, 1.5);
        assert_eq!(controller.surface().volume, 0.3);
    }
}
