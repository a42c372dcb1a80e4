//! Seam to the broadcasting application's control session.

use crate::RemoteResult;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// An item of a scene as reported by the remote application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneItem {
    /// Name of the source the item shows.
    pub source_name: String,
    /// Identifier of the item within its scene.
    pub item_id: i64,
}

/// An already-connected remote-control session.
///
/// The engine is the only caller once it is running and never issues two
/// calls at the same time, so implementations need no internal queueing.
#[async_trait]
pub trait RemoteControl: Send + Sync {
    /// Switch the program scene.
    async fn set_current_scene(&self, scene_name: &str) -> RemoteResult<()>;

    /// List the items of a scene in their display order.
    async fn list_scene_items(&self, scene_name: &str) -> RemoteResult<Vec<SceneItem>>;

    /// Show or hide one item of a scene.
    async fn set_source_visible(
        &self,
        scene_name: &str,
        item_id: i64,
        visible: bool,
    ) -> RemoteResult<()>;

    /// Toggle recording.
    async fn toggle_recording(&self) -> RemoteResult<()>;

    /// Start streaming.
    async fn start_streaming(&self) -> RemoteResult<()>;

    /// Stop streaming.
    async fn stop_streaming(&self) -> RemoteResult<()>;

    /// Send a request that has no typed method.
    async fn send_raw(&self, request: &str, params: Map<String, Value>) -> RemoteResult<Value>;
}
