use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Which surface property a slider writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderTarget {
    Volume,
    PlaybackRate,
}

/// What activating a control does to the playback surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlEffect {
    /// Jump by a fixed offset in seconds (negative = rewind).
    Skip { delta: f64 },
    /// Bind a slider to a surface property.
    SliderBind { target: SliderTarget },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlButton {
    pub label: String,
    pub effect: ControlEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderControl {
    pub label: String,
    pub target: SliderTarget,
    pub min: f64,
    pub max: f64,
}

/// The full control surface layout, passed to the controller at
/// construction instead of being discovered from widget metadata at
/// call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    pub buttons: Vec<ControlButton>,
    pub sliders: Vec<SliderControl>,
}

impl ControlsConfig {
    /// Load a layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self, PlayerError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                ControlButton {
                    label: "« 10s".to_string(),
                    effect: ControlEffect::Skip { delta: -10.0 },
                },
                ControlButton {
                    label: "25s »".to_string(),
                    effect: ControlEffect::Skip { delta: 25.0 },
                },
            ],
            sliders: vec![
                SliderControl {
                    label: "volume".to_string(),
                    target: SliderTarget::Volume,
                    min: 0.0,
                    max: 1.0,
                },
                SliderControl {
                    label: "speed".to_string(),
                    target: SliderTarget::PlaybackRate,
                    min: 0.5,
                    max: 2.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_layout_matches_classic_surface() {
        let config = ControlsConfig::default();
        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.buttons[0].effect, ControlEffect::Skip { delta: -10.0 });
        assert_eq!(config.buttons[1].effect, ControlEffect::Skip { delta: 25.0 });
        assert_eq!(config.sliders.len(), 2);
        assert_eq!(config.sliders[0].target, SliderTarget::Volume);
        assert_eq!(config.sliders[1].target, SliderTarget::PlaybackRate);
    }

    #[test]
    fn load_reads_layout_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&ControlsConfig::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = ControlsConfig::load(file.path()).unwrap();
        assert_eq!(loaded, ControlsConfig::default());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(ControlsConfig::load(file.path()).is_err());
    }
}
