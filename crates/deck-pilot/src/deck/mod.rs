//! Stream Deck front-end.

mod deck_input;
mod key_image;

pub(crate) use {deck_input::DeckInput, key_image::key_image};

#[cfg(test)]
pub(crate) use deck_input::{forward_key_presses, handle_key_press};
