use crate::Scene;

use serde::{Deserialize, Serialize};

/// A named set of buttons, optionally tied to a scene collection.
///
/// Exactly one profile is active per process; it is chosen before the engine
/// starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Scene collection to activate before any button is usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_collection: Option<String>,
    /// Buttons, in key order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Profile {
    /// The scene bound to button `index`, if any.
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }
}
