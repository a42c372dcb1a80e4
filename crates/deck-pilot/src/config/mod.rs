mod config;
mod deck_config;
mod obs_config;
mod profiles_config;
mod tray_config;

pub(crate) use {
    config::Config, deck_config::DeckConfig, obs_config::ObsConfig,
    profiles_config::ProfilesConfig, tray_config::TrayConfig,
};

pub(crate) const DEFAULT_OBS_HOST: &str = "localhost";
pub(crate) const DEFAULT_OBS_PORT: u16 = 4455;
pub(crate) const DEFAULT_BRIGHTNESS: u8 = 60;
pub(crate) const DEFAULT_PROFILES_FILE: &str = "profiles.json";

pub(crate) fn default_obs_host() -> String {
    DEFAULT_OBS_HOST.to_string()
}

pub(crate) fn default_obs_port() -> u16 {
    DEFAULT_OBS_PORT
}

pub(crate) fn default_brightness() -> u8 {
    DEFAULT_BRIGHTNESS
}

pub(crate) fn default_enabled() -> bool {
    true
}
