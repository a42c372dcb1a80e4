use crate::CommandKind;

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// Command text recorded for an action that has no `command` key.
const MISSING_COMMAND: &str = "<missing>";

/// One step of a button's command sequence.
///
/// Immutable once loaded. `params` keys depend on the command, e.g.
/// `sceneName` and `sourceName` for [`CommandKind::ShowSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Command to execute.
    ///
    /// A missing, null or non-string value loads as
    /// [`CommandKind::Unrecognized`] so the rest of the profile still loads.
    #[serde(default = "missing_command", deserialize_with = "command_from_value")]
    pub command: CommandKind,
    /// Command parameters as they appear in the profile.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    /// Pause after this action before the next one, in milliseconds.
    ///
    /// Whole-number floats such as `1500.0` are accepted.
    #[serde(
        rename = "delay",
        default,
        skip_serializing_if = "is_zero",
        deserialize_with = "delay_from_value"
    )]
    pub delay_ms: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn missing_command() -> CommandKind {
    CommandKind::Unrecognized(MISSING_COMMAND.to_string())
}

fn command_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CommandKind, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => CommandKind::from(text),
        other => CommandKind::Unrecognized(other.to_string()),
    })
}

fn delay_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(0),
        Value::Number(number) => number,
        other => {
            return Err(de::Error::custom(format!(
                "delay must be a non-negative number of milliseconds, got {}",
                other
            )));
        }
    };

    if let Some(millis) = number.as_u64() {
        return Ok(millis);
    }

    match number.as_f64() {
        Some(millis) if millis >= 0.0 && millis.fract() == 0.0 && millis <= u64::MAX as f64 => {
            Ok(millis as u64)
        }
        _ => Err(de::Error::custom(format!(
            "delay must be a non-negative whole number of milliseconds, got {}",
            number
        ))),
    }
}

impl Action {
    /// Create an action with no parameters and no trailing delay.
    pub fn new(command: CommandKind) -> Self {
        Self {
            command,
            params: Map::new(),
            delay_ms: 0,
        }
    }

    /// Add a string parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Set the trailing delay in milliseconds.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Look up a non-empty string parameter.
    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Trailing delay as a [`Duration`], `None` when zero.
    pub fn delay(&self) -> Option<Duration> {
        (self.delay_ms > 0).then(|| Duration::from_millis(self.delay_ms))
    }
}
