use std::path::Path;
use std::sync::{Arc, Mutex};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_pbutils as gst_pbutils;
use gstreamer_video as gst_video;
use log::{error, info, warn};

use crate::error::PlayerError;
use crate::types::surface::{PlaybackSurface, SurfaceEvent};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// One decoded RGBA frame handed from the appsink tap to the UI.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A playbin-backed playback surface. The pipeline owns the clock;
/// this type only issues transport requests and observes the results,
/// so `poll_events` reports what actually happened rather than what
/// was asked for.
pub struct PipelineSurface {
    playbin: gst::Element,
    duration: f64,
    rate: f64,
    desired_playing: bool,
    last_paused: bool,
    last_position: f64,
    frame: Arc<Mutex<Option<VideoFrame>>>,
}

impl PipelineSurface {
    /// Build a playbin for the given file, install the RGBA video tap,
    /// preroll paused, and resolve the media duration.
    pub fn open(path: &Path) -> Result<Self, PlayerError> {
        let uri = path_to_file_uri(path)?;

        let playbin = gst::ElementFactory::make("playbin")
            .build()
            .map_err(|e| PlayerError::Element(format!("Failed to create playbin: {e}")))?;
        playbin.set_property("uri", &uri);

        let frame = Arc::new(Mutex::new(None));
        let appsink = build_video_tap(Arc::clone(&frame));
        playbin.set_property("video-sink", &appsink);

        playbin
            .set_state(gst::State::Paused)
            .map_err(|_| PlayerError::State("Failed to set pipeline to Paused".to_string()))?;

        // Wait for preroll so the duration query can be answered.
        let (state_result, state, _pending) = playbin.state(Some(gst::ClockTime::from_seconds(5)));
        if state_result.is_err() || state != gst::State::Paused {
            playbin.set_state(gst::State::Null).ok();
            return Err(PlayerError::State(format!(
                "Pipeline failed to preroll, current state: {state:?}"
            )));
        }

        let duration = playbin
            .query_duration::<gst::ClockTime>()
            .map(clock_time_to_secs)
            .or_else(|| discover_duration(&uri))
            .unwrap_or(0.0);
        info!("Opened {uri} (duration {duration:.2}s)");

        Ok(Self {
            playbin,
            duration,
            rate: 1.0,
            desired_playing: false,
            last_paused: true,
            last_position: 0.0,
            frame,
        })
    }

    /// Diff the live pipeline against the last observed snapshot and
    /// report the transitions as surface events. Also drains the bus:
    /// pipeline errors are logged, end of stream reads as a pause.
    pub fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        self.drain_bus();

        if self.duration == 0.0 {
            // Some containers only answer the duration query once data
            // has flowed.
            if let Some(duration) = self
                .playbin
                .query_duration::<gst::ClockTime>()
                .map(clock_time_to_secs)
            {
                self.duration = duration;
            }
        }

        let paused_now = self.is_paused();
        if paused_now != self.last_paused {
            self.last_paused = paused_now;
            events.push(if paused_now {
                SurfaceEvent::Pause
            } else {
                SurfaceEvent::Play
            });
        }

        let position = self.current_time();
        if position != self.last_position {
            self.last_position = position;
            events.push(SurfaceEvent::TimeUpdate);
        }

        events
    }

    /// Most recent frame from the video tap, if a new one arrived since
    /// the last call.
    pub fn take_frame(&self) -> Option<VideoFrame> {
        self.frame.lock().ok()?.take()
    }

    fn drain_bus(&mut self) {
        let Some(bus) = self.playbin.bus() else {
            return;
        };
        while let Some(msg) = bus.pop() {
            match msg.view() {
                gst::MessageView::Eos(_) => {
                    info!("End of stream");
                    self.desired_playing = false;
                    if let Err(e) = self.playbin.set_state(gst::State::Paused) {
                        error!("Failed to pause after end of stream: {e}");
                    }
                }
                gst::MessageView::Error(err) => {
                    error!("Pipeline error: {}", err.error());
                }
                gst::MessageView::Warning(w) => {
                    warn!("Pipeline warning: {}", w.error());
                }
                _ => {}
            }
        }
    }
}

impl PlaybackSurface for PipelineSurface {
    fn play(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Playing) {
            error!("Failed to play: {e}");
            return;
        }
        self.desired_playing = true;
    }

    fn pause(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Paused) {
            error!("Failed to pause: {e}");
            return;
        }
        self.desired_playing = false;
    }

    fn is_paused(&self) -> bool {
        !self.desired_playing
    }

    fn current_time(&self) -> f64 {
        // The position query is unanswerable mid-flush; fall back to the
        // last observed (or requested) position.
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(clock_time_to_secs)
            .unwrap_or(self.last_position)
    }

    fn set_current_time(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let clamped = if self.duration > 0.0 {
            time.clamp(0.0, self.duration)
        } else {
            time.max(0.0)
        };
        let target = gst::ClockTime::from_nseconds((clamped * NANOS_PER_SEC) as u64);
        if let Err(e) = self
            .playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, target)
        {
            error!("Seek to {clamped:.2}s failed: {e}");
            return;
        }
        self.last_position = clamped;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.playbin.property::<f64>("volume")
    }

    fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.playbin
            .set_property("volume", volume.clamp(0.0, 1.0));
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        let position = gst::ClockTime::from_nseconds((self.current_time() * NANOS_PER_SEC) as u64);
        let seek = gst::event::Seek::new(
            rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            position,
            gst::SeekType::End,
            gst::ClockTime::ZERO,
        );
        if self.playbin.send_event(seek) {
            self.rate = rate;
        } else {
            error!("Rate change to {rate:.2}x failed");
        }
    }
}

impl Drop for PipelineSurface {
    fn drop(&mut self) {
        self.playbin.set_state(gst::State::Null).ok();
    }
}

/// Appsink that converts the video stream to RGBA and keeps only the
/// latest frame. The callback runs on a streaming thread; the mutex-held
/// slot is the only state it shares with the UI.
fn build_video_tap(frame: Arc<Mutex<Option<VideoFrame>>>) -> gst_app::AppSink {
    let appsink = gst_app::AppSink::builder()
        .caps(
            &gst::Caps::builder("video/x-raw")
                .field("format", "RGBA")
                .build(),
        )
        .build();
    appsink.set_property("max-buffers", 1u32);
    appsink.set_property("drop", true);

    appsink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |sink| {
                let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                let caps = sample.caps().ok_or(gst::FlowError::Error)?;
                let info =
                    gst_video::VideoInfo::from_caps(caps).map_err(|_| gst::FlowError::Error)?;
                let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;

                // Rows may carry stride padding; compact to tight RGBA.
                let width = info.width() as usize;
                let height = info.height() as usize;
                let stride = info.stride()[0] as usize;
                let row_bytes = width * 4;
                let data = if stride == row_bytes {
                    map.as_slice().to_vec()
                } else {
                    let mut tight = Vec::with_capacity(row_bytes * height);
                    for row in map.as_slice().chunks(stride).take(height) {
                        tight.extend_from_slice(&row[..row_bytes]);
                    }
                    tight
                };

                if let Ok(mut slot) = frame.lock() {
                    *slot = Some(VideoFrame {
                        data,
                        width: info.width(),
                        height: info.height(),
                    });
                }
                Ok(gst::FlowSuccess::Ok)
            })
            .build(),
    );

    appsink
}

fn discover_duration(uri: &str) -> Option<f64> {
    let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)).ok()?;
    let media_info = discoverer.discover_uri(uri).ok()?;
    media_info.duration().map(clock_time_to_secs)
}

fn clock_time_to_secs(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / NANOS_PER_SEC
}

#[cfg(windows)]
fn path_to_file_uri(path: &Path) -> Result<String, PlayerError> {
    let abs_path = std::fs::canonicalize(path)?;
    let mut path = abs_path.to_string_lossy().replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    Ok(format!("file:///{path}"))
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &Path) -> Result<String, PlayerError> {
    let abs_path = std::fs::canonicalize(path)?;
    Ok(format!("file://{}", abs_path.to_string_lossy()))
}
