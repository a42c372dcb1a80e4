use crate::CommandKind;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised by a [`RemoteControl`](crate::RemoteControl) implementation.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The underlying connection failed while sending or receiving.
    #[error("Transport error: {reason} {location}")]
    Transport {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The remote application rejected the request.
    #[error("Request {request} failed with code {code}: {comment} {location}")]
    RequestFailed {
        /// Name of the rejected request.
        request: String,
        /// Status code reported by the remote application.
        code: u16,
        /// Optional explanation reported by the remote application.
        comment: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The remote application answered with something we cannot interpret.
    #[error("Unexpected response: {reason} {location}")]
    UnexpectedResponse {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The session has been closed by either side.
    #[error("Connection closed {location}")]
    ConnectionClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl RemoteError {
    /// Build a [`RemoteError::Transport`] at the caller's location.
    #[track_caller]
    pub fn transport(reason: impl Into<String>) -> Self {
        RemoteError::Transport {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build a [`RemoteError::UnexpectedResponse`] at the caller's location.
    #[track_caller]
    pub fn unexpected(reason: impl Into<String>) -> Self {
        RemoteError::UnexpectedResponse {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias for remote-control calls.
pub type RemoteResult<T> = StdResult<T, RemoteError>;

/// Non-fatal failure of a single action.
///
/// None of these abort the sequence; the engine reports them and moves on to
/// the next action.
#[derive(Error, Debug)]
pub enum ActionError {
    /// A required parameter was absent or not a string.
    #[error("{command}: missing parameter '{parameter}' {location}")]
    MissingParameter {
        /// Command that needed the parameter.
        command: CommandKind,
        /// Name of the missing parameter.
        parameter: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The named source is not an item of the named scene.
    #[error("Source '{source_name}' not found in scene '{scene_name}' {location}")]
    TargetNotFound {
        /// Scene whose item list was searched.
        scene_name: String,
        /// Source that was looked for.
        source_name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The remote call itself failed.
    #[error("{command}: remote call failed: {source} {location}")]
    RemoteCallFailed {
        /// Command whose remote call failed.
        command: CommandKind,
        /// The underlying remote error.
        #[source]
        source: RemoteError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The action names a command this engine does not know.
    #[error("Unknown command '{command}' {location}")]
    UnknownCommand {
        /// The command text as it appeared in the profile.
        command: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl ActionError {
    #[track_caller]
    pub(crate) fn missing(command: &CommandKind, parameter: &'static str) -> Self {
        ActionError::MissingParameter {
            command: command.clone(),
            parameter,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn remote(command: &CommandKind, source: RemoteError) -> Self {
        ActionError::RemoteCallFailed {
            command: command.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
