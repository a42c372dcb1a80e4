use crate::config::{default_brightness, default_enabled};

use serde::{Deserialize, Serialize};

/// Stream Deck front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Look for a Stream Deck at startup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Backlight brightness in percent.
    #[serde(default = "default_brightness")]
    pub brightness: u8,
}

impl DeckConfig {
    /// Brightness clamped to 0..=100.
    pub fn brightness_percent(&self) -> u8 {
        self.brightness.min(100)
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            brightness: default_brightness(),
        }
    }
}
