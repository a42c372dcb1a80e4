use crate::config::default_enabled;

use serde::{Deserialize, Serialize};

/// Tray menu front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Show the tray menu.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}
