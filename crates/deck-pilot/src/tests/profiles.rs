use crate::{AppError, ProfileSet};

use std::io::Cursor;

const PROFILES: &str = r#"{
    "1": {
        "name": "Sunday Service",
        "scene_collection": "Church",
        "scenes": [
            { "name": "Start", "actions": [ { "command": "set_scene", "params": { "sceneName": "Intro" } } ] }
        ]
    },
    "2": {
        "name": "Rehearsal",
        "scenes": []
    }
}"#;

/// WHAT: The prompt retries until a valid key is entered
/// WHY: A typo at startup must not crash the program
#[test]
#[allow(clippy::unwrap_used)]
fn given_invalid_then_valid_choice_when_choosing_then_valid_profile_returned() {
    // Given: Two profiles and input with a wrong key first
    let set = ProfileSet::from_json(PROFILES).unwrap();
    let input = Cursor::new("7\n 2 \n");
    let mut output = Vec::new();

    // When: Choosing
    let profile = set.choose(None, input, &mut output).unwrap();

    // Then: The second key wins and the listing was shown in file order
    assert_eq!(profile.name, "Rehearsal");
    let shown = String::from_utf8(output).unwrap();
    let first = shown.find("1: Sunday Service (scene_collection: Church)").unwrap();
    let second = shown.find("2: Rehearsal (scene_collection: -)").unwrap();
    assert!(first < second);
    assert!(shown.contains("Invalid choice, try again."));
}

/// WHAT: A configured default skips the prompt
/// WHY: Unattended setups have no terminal to answer
#[test]
#[allow(clippy::unwrap_used)]
fn given_configured_default_when_choosing_then_no_prompt() {
    // Given: A default key and no input
    let set = ProfileSet::from_json(PROFILES).unwrap();
    let mut output = Vec::new();

    // When: Choosing
    let profile = set.choose(Some("1"), Cursor::new(""), &mut output).unwrap();

    // Then: The default is used silently
    assert_eq!(profile.scene_collection.as_deref(), Some("Church"));
    assert!(output.is_empty());
}

/// WHAT: End of input without a choice is an error
/// WHY: Prevents spinning forever on a closed stdin
#[test]
#[allow(clippy::unwrap_used)]
fn given_eof_when_choosing_then_profile_error() {
    // Given: A stale default and empty input
    let set = ProfileSet::from_json(PROFILES).unwrap();

    // When: Choosing
    let result = set.choose(Some("9"), Cursor::new(""), Vec::new());

    // Then: ProfileError
    assert!(matches!(result, Err(AppError::ProfileError { .. })));
}

/// WHAT: Empty and malformed profile files are rejected
/// WHY: There is nothing to bind buttons to
#[test]
fn given_empty_or_malformed_json_when_parsing_then_profile_error() {
    // Given/When/Then: Both fail with ProfileError
    assert!(matches!(
        ProfileSet::from_json("{}"),
        Err(AppError::ProfileError { .. })
    ));
    assert!(matches!(
        ProfileSet::from_json("[1, 2]"),
        Err(AppError::ProfileError { .. })
    ));
}

/// WHAT: Profiles load from disk
/// WHY: The file is the only source of button definitions
#[test]
#[allow(clippy::unwrap_used)]
fn given_profiles_file_when_loading_then_all_profiles_available() {
    // Given: A profiles file
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profiles.json");
    std::fs::write(&path, PROFILES).unwrap();

    // When: Loading
    let set = ProfileSet::load(&path).unwrap();

    // Then: Both profiles are present
    assert_eq!(set.count(), 2);
    assert_eq!(set.get("1").unwrap().scenes.len(), 1);
    assert!(set.get("3").is_none());
}
