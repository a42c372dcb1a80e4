//! obs-websocket (protocol v5) client.

mod client;
mod protocol;

pub(crate) use client::ObsClient;

#[cfg(test)]
pub(crate) use protocol::{
    AuthChallenge, Envelope, Hello, RequestResponse, auth_response, identify_message,
    parse_scene_items, request_message,
};
