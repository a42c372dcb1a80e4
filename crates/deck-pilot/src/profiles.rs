//! Profile file loading and interactive selection.

use crate::{AppError, AppResult};

use std::{
    fs,
    io::{BufRead, Write},
    panic::Location,
    path::Path,
};

use deck_pilot_core::Profile;
use error_location::ErrorLocation;
use indexmap::IndexMap;
use tracing::{info, instrument};

/// All profiles of a profiles file, keyed by their selection key, in file order.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: IndexMap<String, Profile>,
}

impl ProfileSet {
    /// Read and parse a profiles file.
    #[track_caller]
    #[instrument]
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ProfileError {
            reason: format!("Failed to read profiles file {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let set = Self::from_json(&contents)?;
        info!(path = ?path, profile_count = set.count(), "Profiles loaded");

        Ok(set)
    }

    /// Parse profiles from JSON text.
    #[track_caller]
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let profiles: IndexMap<String, Profile> =
            serde_json::from_str(contents).map_err(|e| AppError::ProfileError {
                reason: format!("Failed to parse profiles: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if profiles.is_empty() {
            return Err(AppError::ProfileError {
                reason: "Profiles file contains no profiles".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { profiles })
    }

    /// Number of profiles.
    pub fn count(&self) -> usize {
        self.profiles.len()
    }

    /// Profile by selection key.
    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.profiles.get(key)
    }

    /// Pick the active profile.
    ///
    /// Uses `preferred` when it names an existing profile. Otherwise lists
    /// the profiles on `output` and reads keys from `input` until a valid one
    /// is entered. End of input is an error.
    #[track_caller]
    pub fn choose<R: BufRead, W: Write>(
        &self,
        preferred: Option<&str>,
        mut input: R,
        mut output: W,
    ) -> AppResult<Profile> {
        if let Some(profile) = preferred.and_then(|key| self.get(key)) {
            info!(profile = %profile.name, "Using configured default profile");
            return Ok(profile.clone());
        }

        writeln!(output, "Choose profile / scene collection:")?;
        for (key, profile) in &self.profiles {
            let collection = profile.scene_collection.as_deref().unwrap_or("-");
            writeln!(
                output,
                "{}: {} (scene_collection: {})",
                key, profile.name, collection
            )?;
        }

        let mut line = String::new();
        loop {
            write!(output, "Enter profile number: ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(AppError::ProfileError {
                    reason: "No profile chosen before end of input".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            match self.get(line.trim()) {
                Some(profile) => return Ok(profile.clone()),
                None => writeln!(output, "Invalid choice, try again.")?,
            }
        }
    }
}
