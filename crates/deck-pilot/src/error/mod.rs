use deck_pilot_core::RemoteError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the deck-pilot binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote-control session error.
    #[error("Remote error: {source} {location}")]
    Remote {
        /// The underlying remote error.
        #[source]
        source: RemoteError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Could not establish the obs-websocket session.
    #[error("OBS connection failed: {reason} {location}")]
    ObsConnectFailed {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Profile file could not be read, parsed or selected from.
    #[error("Profile error: {reason} {location}")]
    ProfileError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Stream Deck enumeration, open or write failed.
    #[error("Stream Deck error: {reason} {location}")]
    DeviceError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Tray icon or menu construction failed.
    #[error("Tray error: {reason} {location}")]
    TrayError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem or terminal operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<RemoteError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<RemoteError> for AppError {
    #[track_caller]
    fn from(source: RemoteError) -> Self {
        AppError::Remote {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
