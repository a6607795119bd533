mod controller;
mod error;
mod playback;
mod types;
mod ui;

use std::path::PathBuf;

use gstreamer as gst;
use log::info;

use crate::controller::PlayerController;
use crate::error::PlayerError;
use crate::playback::pipeline::PipelineSurface;
use crate::types::controls::ControlsConfig;
use crate::ui::app::PlayerApp;

fn main() -> Result<(), PlayerError> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    gst::init().map_err(|e| PlayerError::Init(e.to_string()))?;

    let (media_path, controls_path) = parse_args();

    let media_path = media_path
        .or_else(|| {
            rfd::FileDialog::new()
                .add_filter("Media", &["mp4", "mov", "mkv", "webm", "mp3", "wav", "ogg", "flac"])
                .pick_file()
        })
        .ok_or_else(|| PlayerError::Io("No media file selected".to_string()))?;

    let config = match controls_path {
        Some(path) => ControlsConfig::load(&path)?,
        None => ControlsConfig::default(),
    };

    info!("Starting playdeck with {}", media_path.display());
    let surface = PipelineSurface::open(&media_path)?;
    let controller = PlayerController::new(surface, config);
    let app = PlayerApp::new(controller);

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Playdeck",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

/// `playdeck [--controls layout.json] [media-file]`
fn parse_args() -> (Option<PathBuf>, Option<PathBuf>) {
    let mut media = None;
    let mut controls = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--controls" {
            controls = args.next().map(PathBuf::from);
        } else {
            media = Some(PathBuf::from(arg));
        }
    }
    (media, controls)
}
