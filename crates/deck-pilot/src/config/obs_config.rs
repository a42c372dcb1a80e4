use crate::config::{default_obs_host, default_obs_port};

use serde::{Deserialize, Serialize};

/// obs-websocket connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsConfig {
    /// Host running OBS.
    #[serde(default = "default_obs_host")]
    pub host: String,
    /// obs-websocket port.
    #[serde(default = "default_obs_port")]
    pub port: u16,
    /// Server password, if authentication is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ObsConfig {
    /// WebSocket URL of the server.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            host: default_obs_host(),
            port: default_obs_port(),
            password: None,
        }
    }
}
