/// The capability set the controller needs from whatever is actually
/// playing media: transport control, a clock, and the two adjustable
/// properties the sliders bind to.
///
/// Times are in seconds. `volume` is linear in `[0, 1]`;
/// `playback_rate` is a speed multiplier (1.0 = normal speed).
pub trait PlaybackSurface {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn current_time(&self) -> f64;
    /// Implementations clamp the target to `[0, duration]`.
    fn set_current_time(&mut self, time: f64);
    /// 0.0 while the duration is not yet known.
    fn duration(&self) -> f64;

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
}

/// Notifications a surface emits as its state changes. These drive the
/// derived visuals (toggle glyph, progress fill) rather than the input
/// handlers, so the UI stays consistent with the surface even when it
/// changes state on its own (end of stream, external control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Play,
    Pause,
    TimeUpdate,
}
