//! obs-websocket v5 message shapes and authentication.

use deck_pilot_core::{RemoteError, RemoteResult, SceneItem};

use std::panic::Location;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};

/// RPC version we negotiate.
pub(crate) const RPC_VERSION: u32 = 1;

/// Opcodes used by this client.
pub(crate) mod op {
    pub(crate) const HELLO: u8 = 0;
    pub(crate) const IDENTIFY: u8 = 1;
    pub(crate) const IDENTIFIED: u8 = 2;
    pub(crate) const REQUEST: u8 = 6;
    pub(crate) const REQUEST_RESPONSE: u8 = 7;
}

/// Every message is `{ "op": <opcode>, "d": <data> }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub(crate) op: u8,
    #[serde(default)]
    pub(crate) d: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hello {
    #[serde(default)]
    pub(crate) obs_web_socket_version: Option<String>,
    pub(crate) rpc_version: u32,
    #[serde(default)]
    pub(crate) authentication: Option<AuthChallenge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthChallenge {
    pub(crate) challenge: String,
    pub(crate) salt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestStatus {
    pub(crate) result: bool,
    pub(crate) code: u16,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestResponse {
    pub(crate) request_type: String,
    pub(crate) request_id: String,
    pub(crate) request_status: RequestStatus,
    #[serde(default)]
    pub(crate) response_data: Option<Value>,
}

impl RequestResponse {
    /// Response data on success, `RequestFailed` otherwise.
    #[track_caller]
    pub(crate) fn into_result(self) -> RemoteResult<Value> {
        if self.request_status.result {
            return Ok(self.response_data.unwrap_or(Value::Null));
        }

        Err(RemoteError::RequestFailed {
            request: self.request_type,
            code: self.request_status.code,
            comment: self.request_status.comment.unwrap_or_default(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneItemEntry {
    source_name: String,
    scene_item_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneItemList {
    scene_items: Vec<SceneItemEntry>,
}

/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub(crate) fn auth_response(password: &str, challenge: &AuthChallenge) -> String {
    let secret = STANDARD.encode(Sha256::digest(
        format!("{}{}", password, challenge.salt).as_bytes(),
    ));
    STANDARD.encode(Sha256::digest(
        format!("{}{}", secret, challenge.challenge).as_bytes(),
    ))
}

/// Identify message. We subscribe to no events.
pub(crate) fn identify_message(authentication: Option<String>) -> Value {
    let mut d = json!({
        "rpcVersion": RPC_VERSION,
        "eventSubscriptions": 0,
    });
    if let (Some(auth), Some(map)) = (authentication, d.as_object_mut()) {
        map.insert("authentication".to_string(), Value::String(auth));
    }
    json!({ "op": op::IDENTIFY, "d": d })
}

pub(crate) fn request_message(request_type: &str, request_id: &str, data: Map<String, Value>) -> Value {
    let mut d = json!({
        "requestType": request_type,
        "requestId": request_id,
    });
    if let (false, Some(map)) = (data.is_empty(), d.as_object_mut()) {
        map.insert("requestData".to_string(), Value::Object(data));
    }
    json!({ "op": op::REQUEST, "d": d })
}

/// Scene items from a `GetSceneItemList` response.
#[track_caller]
pub(crate) fn parse_scene_items(data: Value) -> RemoteResult<Vec<SceneItem>> {
    let list: SceneItemList = serde_json::from_value(data).map_err(|e| {
        RemoteError::UnexpectedResponse {
            reason: format!("Malformed scene item list: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    Ok(list
        .scene_items
        .into_iter()
        .map(|entry| SceneItem {
            source_name: entry.source_name,
            item_id: entry.scene_item_id,
        })
        .collect())
}
