use crate::{
    AppError, AppResult,
    config::ObsConfig,
    obs::protocol::{
        Envelope, Hello, RPC_VERSION, RequestResponse, auth_response, identify_message, op,
        parse_scene_items, request_message,
    },
};

use std::panic::Location;

use async_trait::async_trait;
use deck_pilot_core::{RemoteControl, RemoteError, RemoteResult, SceneItem};
use error_location::ErrorLocation;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Map, Value, json};
use tokio::{net::TcpStream, sync::Mutex};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An identified obs-websocket session.
///
/// Requests are answered in-line: the stream lock is held from sending a
/// request until its response arrives.
pub struct ObsClient {
    stream: Mutex<WsStream>,
}

impl ObsClient {
    /// Connect and complete the Hello/Identify handshake.
    #[instrument(skip(config), fields(url = %config.url()))]
    pub async fn connect(config: &ObsConfig) -> AppResult<Self> {
        let (mut stream, _) =
            connect_async(config.url())
                .await
                .map_err(|e| AppError::ObsConnectFailed {
                    reason: format!("WebSocket connect failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let hello = read_envelope(&mut stream).await?;
        if hello.op != op::HELLO {
            return Err(AppError::ObsConnectFailed {
                reason: format!("Expected Hello, got opcode {}", hello.op),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let hello: Hello =
            serde_json::from_value(hello.d).map_err(|e| AppError::ObsConnectFailed {
                reason: format!("Malformed Hello: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(
            server_version = hello.obs_web_socket_version.as_deref().unwrap_or("unknown"),
            rpc_version = hello.rpc_version,
            auth_required = hello.authentication.is_some(),
            "Received Hello"
        );

        let authentication = match &hello.authentication {
            Some(challenge) => {
                let password =
                    config
                        .password
                        .as_deref()
                        .ok_or_else(|| AppError::ObsConnectFailed {
                            reason: "Server requires a password but none is configured"
                                .to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        })?;
                Some(auth_response(password, challenge))
            }
            None => None,
        };

        send_json(&mut stream, &identify_message(authentication)).await?;

        let identified = read_envelope(&mut stream).await?;
        if identified.op != op::IDENTIFIED {
            return Err(AppError::ObsConnectFailed {
                reason: format!(
                    "Identify rejected (opcode {}), check the configured password",
                    identified.op
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let negotiated = identified
            .d
            .get("negotiatedRpcVersion")
            .and_then(Value::as_u64)
            .unwrap_or(u64::from(RPC_VERSION));

        info!(rpc_version = negotiated, "Connected to OBS");

        Ok(Self {
            stream: Mutex::new(stream),
        })
    }

    /// Send one request and wait for its response.
    #[instrument(skip(self, data))]
    async fn request(&self, request_type: &str, data: Map<String, Value>) -> RemoteResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        let mut stream = self.stream.lock().await;

        send_json(&mut stream, &request_message(request_type, &request_id, data)).await?;

        loop {
            let envelope = read_envelope(&mut stream).await?;
            if envelope.op != op::REQUEST_RESPONSE {
                trace!(op = envelope.op, "Skipping unrelated message");
                continue;
            }

            let response: RequestResponse = serde_json::from_value(envelope.d)
                .map_err(|e| RemoteError::unexpected(format!("Malformed response: {}", e)))?;

            if response.request_id != request_id {
                trace!(request_id = %response.request_id, "Skipping stale response");
                continue;
            }

            debug!(request_type, "Request answered");
            return response.into_result();
        }
    }
}

async fn send_json(stream: &mut WsStream, message: &Value) -> RemoteResult<()> {
    stream
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|e| RemoteError::transport(format!("Send failed: {}", e)))
}

async fn read_envelope(stream: &mut WsStream) -> RemoteResult<Envelope> {
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                return serde_json::from_str(&text)
                    .map_err(|e| RemoteError::unexpected(format!("Malformed message: {}", e)));
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(RemoteError::ConnectionClosed {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(RemoteError::transport(format!("Receive failed: {}", e))),
        }
    }
}

fn params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[async_trait]
impl RemoteControl for ObsClient {
    async fn set_current_scene(&self, scene_name: &str) -> RemoteResult<()> {
        self.request(
            "SetCurrentProgramScene",
            params(json!({ "sceneName": scene_name })),
        )
        .await
        .map(drop)
    }

    async fn list_scene_items(&self, scene_name: &str) -> RemoteResult<Vec<SceneItem>> {
        let data = self
            .request("GetSceneItemList", params(json!({ "sceneName": scene_name })))
            .await?;
        parse_scene_items(data)
    }

    async fn set_source_visible(
        &self,
        scene_name: &str,
        item_id: i64,
        visible: bool,
    ) -> RemoteResult<()> {
        self.request(
            "SetSceneItemEnabled",
            params(json!({
                "sceneName": scene_name,
                "sceneItemId": item_id,
                "sceneItemEnabled": visible,
            })),
        )
        .await
        .map(drop)
    }

    async fn toggle_recording(&self) -> RemoteResult<()> {
        self.request("ToggleRecord", Map::new()).await.map(drop)
    }

    async fn start_streaming(&self) -> RemoteResult<()> {
        self.request("StartStream", Map::new()).await.map(drop)
    }

    async fn stop_streaming(&self) -> RemoteResult<()> {
        self.request("StopStream", Map::new()).await.map(drop)
    }

    async fn send_raw(&self, request: &str, params: Map<String, Value>) -> RemoteResult<Value> {
        self.request(request, params).await
    }
}
