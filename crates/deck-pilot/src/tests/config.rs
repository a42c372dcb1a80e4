use crate::config::{Config, DEFAULT_BRIGHTNESS, DEFAULT_OBS_PORT};

use std::fs;

/// WHAT: A missing config file is created with defaults
/// WHY: First run must work without hand-writing a config
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_config_when_loading_then_default_created_next_to_profiles() {
    // Given: An empty directory
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: Defaults are used and the file now exists
    assert!(path.exists());
    assert_eq!(config.obs.host, "localhost");
    assert_eq!(config.obs.port, DEFAULT_OBS_PORT);
    assert!(config.obs.password.is_none());
    assert_eq!(config.profiles.path, dir.path().join("nested").join("profiles.json"));
    assert!(config.deck.enabled);
    assert!(config.tray.enabled);

    // And: Loading again reads the same values back
    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.obs.port, config.obs.port);
    assert_eq!(reloaded.profiles.path, config.profiles.path);
}

/// WHAT: Partial configs fill in defaults and resolve relative profile paths
/// WHY: Users only write the settings they care about
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_config_when_loading_then_defaults_and_relative_path_resolved() {
    // Given: A config with only a password, a relative profile path and a too-bright deck
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[obs]
password = "secret"

[profiles]
path = "my-profiles.json"
default = "2"

[deck]
brightness = 250
"#,
    )
    .unwrap();

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: Unset fields take defaults
    assert_eq!(config.obs.password.as_deref(), Some("secret"));
    assert_eq!(config.obs.url(), format!("ws://localhost:{}", DEFAULT_OBS_PORT));
    assert_eq!(config.profiles.path, dir.path().join("my-profiles.json"));
    assert_eq!(config.profiles.default.as_deref(), Some("2"));
    assert_eq!(config.deck.brightness_percent(), 100);
    assert!(config.tray.enabled);
}

/// WHAT: Default brightness is used when the deck section omits it
/// WHY: A dim deck is better than a blinding one
#[test]
#[allow(clippy::unwrap_used)]
fn given_deck_section_without_brightness_when_loading_then_default_brightness() {
    // Given: A deck section that only disables the device
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[profiles]\npath = \"/tmp/p.json\"\n\n[deck]\nenabled = false\n").unwrap();

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: Disabled with default brightness, absolute path untouched
    assert!(!config.deck.enabled);
    assert_eq!(config.deck.brightness, DEFAULT_BRIGHTNESS);
    assert_eq!(config.profiles.path, std::path::PathBuf::from("/tmp/p.json"));
}

/// WHAT: Malformed TOML is a configuration error
/// WHY: A broken config must stop startup with a clear reason
#[test]
#[allow(clippy::unwrap_used)]
fn given_malformed_config_when_loading_then_config_error() {
    // Given: Invalid TOML
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[obs\nport = ").unwrap();

    // When: Loading
    let result = Config::load_from(&path);

    // Then: ConfigError
    assert!(matches!(result, Err(crate::AppError::ConfigError { .. })));
}

/// WHAT: A config without a profiles section uses profiles.json beside it
/// WHY: Hand-written configs often only set the OBS connection
#[test]
#[allow(clippy::unwrap_used)]
fn given_config_without_profiles_section_when_loading_then_default_profiles_path() {
    // Given: A config with only an obs section
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[obs]\nport = 4460\n").unwrap();

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: The profiles file defaults next to the config, with no preset choice
    assert_eq!(config.obs.port, 4460);
    assert_eq!(config.profiles.path, dir.path().join("profiles.json"));
    assert!(config.profiles.default.is_none());
}
