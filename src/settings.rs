//! Player preferences
//!
//! Read once by the host at load. Nothing is written back.

use serde::{Deserialize, Serialize};

/// Presentation and audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all audio
    pub muted: bool,
    /// Shadow-blur glow around the craft, enemies and coins
    pub glow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            glow: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping the volume into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Effective output volume
    pub fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped_on_load() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.glow);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.volume(), 0.0);
    }
}
