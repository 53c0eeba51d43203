//! Game settings and preferences
//!
//! Read once at startup from the canvas element's `data-settings` attribute
//! (a JSON object). Missing fields take their defaults; nothing is saved.

use serde::Deserialize;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Debug ===
    /// Fixed run seed (otherwise seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Name of the canvas attribute holding the JSON settings
    pub const ATTRIBUTE: &'static str = "data-settings";

    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from {}", Self::ATTRIBUTE);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring malformed {}: {}", Self::ATTRIBUTE, e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.music_volume.clamp(0.0, 1.0)
        }
    }
}
