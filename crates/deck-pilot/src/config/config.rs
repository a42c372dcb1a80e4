//! Configuration management for deck-pilot.
//!
//! Loads and saves the TOML configuration file from the platform config
//! directory (or `DECK_PILOT_CONFIG`), creating a default on first run.

use crate::{
    AppError, AppResult,
    config::{DEFAULT_PROFILES_FILE, DeckConfig, ObsConfig, ProfilesConfig, TrayConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding the config file location.
pub(crate) const CONFIG_PATH_ENV: &str = "DECK_PILOT_CONFIG";

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// obs-websocket connection.
    #[serde(default)]
    pub obs: ObsConfig,
    /// Profile file location and default selection.
    #[serde(default)]
    pub profiles: ProfilesConfig,
    /// Stream Deck front-end.
    #[serde(default)]
    pub deck: DeckConfig,
    /// Tray menu front-end.
    #[serde(default)]
    pub tray: TrayConfig,
}

impl Config {
    /// Load configuration from disk, creating a default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `config_path`, creating a default there if
    /// the file does not exist.
    ///
    /// A relative `profiles.path` is resolved against the config file's
    /// directory.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            info!(config_path = ?config_path, "No config found, creating default");
            return Self::create_default(config_path);
        }

        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if config.profiles.path.is_relative() {
            if let Some(dir) = config_path.parent() {
                config.profiles.path = dir.join(&config.profiles.path);
            }
        }

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(dir) = config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
                debug!(config_dir = ?dir, "Created config directory");
            }
        }

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "deck-pilot", "Deck-Pilot").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let profiles_path = config_path
            .parent()
            .map(|dir| dir.join(DEFAULT_PROFILES_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILES_FILE));

        let config = Config {
            obs: ObsConfig::default(),
            profiles: ProfilesConfig {
                path: profiles_path.clone(),
                default: None,
            },
            deck: DeckConfig::default(),
            tray: TrayConfig::default(),
        };

        config.save_to(config_path)?;

        warn!(
            profiles_path = ?profiles_path,
            "Default config created. Put your button profiles in the profiles file."
        );

        Ok(config)
    }
}
