use crate::Action;

use serde::{Deserialize, Serialize};

/// An RGB colour triple.
pub type Rgb = [u8; 3];

const DEFAULT_COLOR: Rgb = [50, 50, 50];
const DEFAULT_TEXT_COLOR: Rgb = [255, 255, 255];

fn default_color() -> Rgb {
    DEFAULT_COLOR
}

fn default_text_color() -> Rgb {
    DEFAULT_TEXT_COLOR
}

fn default_name() -> String {
    "Scene".to_string()
}

/// One triggerable button and the actions it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Button label.
    #[serde(default = "default_name")]
    pub name: String,
    /// Button background colour.
    #[serde(default = "default_color")]
    pub color: Rgb,
    /// Button label colour.
    #[serde(default = "default_text_color")]
    pub text_color: Rgb,
    /// Actions in execution order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Scene {
    /// Create a scene with default colours.
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_COLOR,
            text_color: DEFAULT_TEXT_COLOR,
            actions,
        }
    }
}
