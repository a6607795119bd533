use flexi_logger::FlexiLoggerError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("GStreamer initialization error: {0}")]
    Init(String),

    #[error("GStreamer element error: {0}")]
    Element(String),

    #[error("GStreamer state error: {0}")]
    State(String),

    #[error("Controls config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Logger initialization error: {0}")]
    Logger(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl From<io::Error> for PlayerError {
    fn from(error: io::Error) -> Self {
        PlayerError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(error: serde_json::Error) -> Self {
        PlayerError::Config(error.to_string())
    }
}

impl From<FlexiLoggerError> for PlayerError {
    fn from(error: FlexiLoggerError) -> Self {
        PlayerError::Logger(error.to_string())
    }
}

impl From<eframe::Error> for PlayerError {
    fn from(error: eframe::Error) -> Self {
        PlayerError::Ui(error.to_string())
    }
}
