mod controller;
mod input_source;

pub use {
    controller::{ExitHook, LifecycleController},
    input_source::InputSource,
};
