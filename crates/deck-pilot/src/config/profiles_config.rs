use crate::config::DEFAULT_PROFILES_FILE;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where profiles live and which one to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Path to the profiles JSON file.
    #[serde(default = "default_profiles_path")]
    pub path: PathBuf,
    /// Profile key to use without prompting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

fn default_profiles_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROFILES_FILE)
}

impl Default for ProfilesConfig {
    /// `profiles.json`, resolved against the config directory on load.
    fn default() -> Self {
        Self {
            path: default_profiles_path(),
            default: None,
        }
    }
}
