use std::fmt;

use serde::{Deserialize, Serialize};

/// The command an [`Action`](crate::Action) carries.
///
/// Profiles spell commands in snake case (`set_scene`, `stop_stream`, ...).
/// Text that matches no known command is kept as [`CommandKind::Unrecognized`]
/// so that loading never fails on it; the engine reports and skips it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommandKind {
    /// Switch the program scene.
    SetScene,
    /// Make a scene item visible.
    ShowSource,
    /// Hide a scene item.
    HideSource,
    /// Toggle recording on or off.
    ToggleRecord,
    /// Start streaming.
    StartStream,
    /// Stop streaming after a fixed grace period.
    StopStream,
    /// Release input devices and terminate the process.
    Quit,
    /// Any command text not listed above.
    Unrecognized(String),
}

impl CommandKind {
    /// Canonical profile spelling of this command.
    pub fn as_str(&self) -> &str {
        match self {
            CommandKind::SetScene => "set_scene",
            CommandKind::ShowSource => "show_source",
            CommandKind::HideSource => "hide_source",
            CommandKind::ToggleRecord => "toggle_record",
            CommandKind::StartStream => "start_streaming",
            CommandKind::StopStream => "stop_stream",
            CommandKind::Quit => "quit",
            CommandKind::Unrecognized(text) => text,
        }
    }
}

impl From<&str> for CommandKind {
    fn from(text: &str) -> Self {
        match text {
            "set_scene" => CommandKind::SetScene,
            "show_source" => CommandKind::ShowSource,
            "hide_source" => CommandKind::HideSource,
            "toggle_record" => CommandKind::ToggleRecord,
            "start_streaming" | "start_stream" => CommandKind::StartStream,
            "stop_stream" | "stop_streaming" => CommandKind::StopStream,
            "quit" => CommandKind::Quit,
            other => CommandKind::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for CommandKind {
    fn from(text: String) -> Self {
        match CommandKind::from(text.as_str()) {
            CommandKind::Unrecognized(_) => CommandKind::Unrecognized(text),
            known => known,
        }
    }
}

impl From<CommandKind> for String {
    fn from(kind: CommandKind) -> Self {
        match kind {
            CommandKind::Unrecognized(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
