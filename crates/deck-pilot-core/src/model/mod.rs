mod action;
mod command_kind;
mod profile;
mod scene;

pub use {
    action::Action,
    command_kind::CommandKind,
    profile::Profile,
    scene::{Rgb, Scene},
};
