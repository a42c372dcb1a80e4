use crate::{app::switch_scene_collection, deck::handle_key_press};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deck_pilot_core::{
    Action, ActionEngine, CommandKind, EngineEvent, LifecycleController, RemoteControl,
    RemoteError, RemoteResult, Scene, SceneItem,
};
use error_location::ErrorLocation;
use serde_json::{Map, Value};
use tokio::{sync::mpsc, time::Instant};

/// Records request names; optionally fails raw requests.
#[derive(Clone, Default)]
struct RecordingRemote {
    requests: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
    fail_raw: bool,
}

#[allow(clippy::unwrap_used)]
impl RecordingRemote {
    fn record(&self, request: &str, params: Map<String, Value>) {
        self.requests
            .lock()
            .unwrap()
            .push((request.to_string(), params));
    }

    fn names(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl RemoteControl for RecordingRemote {
    async fn set_current_scene(&self, scene_name: &str) -> RemoteResult<()> {
        let mut params = Map::new();
        params.insert("sceneName".to_string(), Value::String(scene_name.to_string()));
        self.record("SetCurrentProgramScene", params);
        Ok(())
    }

    async fn list_scene_items(&self, _scene_name: &str) -> RemoteResult<Vec<SceneItem>> {
        Ok(Vec::new())
    }

    async fn set_source_visible(
        &self,
        _scene_name: &str,
        _item_id: i64,
        _visible: bool,
    ) -> RemoteResult<()> {
        Ok(())
    }

    async fn toggle_recording(&self) -> RemoteResult<()> {
        self.record("ToggleRecord", Map::new());
        Ok(())
    }

    async fn start_streaming(&self) -> RemoteResult<()> {
        Ok(())
    }

    async fn stop_streaming(&self) -> RemoteResult<()> {
        Ok(())
    }

    async fn send_raw(&self, request: &str, params: Map<String, Value>) -> RemoteResult<Value> {
        self.record(request, params);
        if self.fail_raw {
            return Err(RemoteError::RequestFailed {
                request: request.to_string(),
                code: 600,
                comment: "No scene collection found".to_string(),
                location: ErrorLocation::from(std::panic::Location::caller()),
            });
        }
        Ok(Value::Null)
    }
}

/// WHAT: Switching collection sends the request then waits for OBS to load it
/// WHY: Buttons pressed too early would target the old collection
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_profile_collection_when_switching_then_request_sent_and_settle_delay_applied() {
    // Given: A remote that accepts everything
    let remote = RecordingRemote::default();
    let started = Instant::now();

    // When: Switching
    switch_scene_collection(&remote, "Church").await;

    // Then: One request with the collection name, followed by the settle delay
    let requests = remote.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "SetCurrentSceneCollection");
    assert_eq!(
        requests[0].1.get("sceneCollectionName"),
        Some(&Value::String("Church".to_string()))
    );
    assert!(started.elapsed() >= crate::app::COLLECTION_SETTLE_DELAY);
}

/// WHAT: A rejected collection switch is tolerated without waiting
/// WHY: The buttons still work against the active collection
#[tokio::test(start_paused = true)]
async fn given_rejected_collection_when_switching_then_no_delay_and_no_panic() {
    // Given: A remote rejecting raw requests
    let remote = RecordingRemote {
        fail_raw: true,
        ..RecordingRemote::default()
    };
    let started = Instant::now();

    // When: Switching
    switch_scene_collection(&remote, "Missing").await;

    // Then: The attempt was made and returned immediately
    assert_eq!(remote.names(), vec!["SetCurrentSceneCollection".to_string()]);
    assert!(started.elapsed() < crate::app::COLLECTION_SETTLE_DELAY);
}

/// WHAT: A key press runs the scene bound to that key; unbound keys do nothing
/// WHY: Key i maps to scene i of the active profile
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_bound_and_unbound_keys_when_pressed_then_only_bound_scene_runs() {
    // Given: Two scenes and a running engine
    let remote = RecordingRemote::default();
    let scenes = vec![
        Scene::new(
            "Intro",
            vec![Action::new(CommandKind::SetScene).with_param("sceneName", "Intro")],
        ),
        Scene::new("Record", vec![Action::new(CommandKind::ToggleRecord)]),
    ];
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (engine, _worker) = ActionEngine::new(remote.clone(), LifecycleController::new())
        .with_events(events_tx)
        .spawn();

    // When: Pressing an unbound key, then key 1 (second scene)
    handle_key_press(9, &scenes, &engine);
    handle_key_press(1, &scenes, &engine);

    // Then: Exactly one sequence runs and it toggles recording
    loop {
        if let EngineEvent::SequenceFinished { executed, .. } = events.recv().await.unwrap() {
            assert_eq!(executed, 1);
            break;
        }
    }
    assert_eq!(remote.names(), vec!["ToggleRecord".to_string()]);
    assert!(engine.is_recording());
}

/// WHAT: The highest key number can be bound and pressed
/// WHY: Key numbers are logged one-based and must not overflow
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_scene_on_last_key_when_pressed_then_scene_runs() {
    // Given: 256 scenes so key 255 is bound, and a running engine
    let remote = RecordingRemote::default();
    let mut scenes: Vec<Scene> = (0..255).map(|i| Scene::new(format!("S{}", i), Vec::new())).collect();
    scenes.push(Scene::new(
        "Last",
        vec![Action::new(CommandKind::SetScene).with_param("sceneName", "Last")],
    ));
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (engine, _worker) = ActionEngine::new(remote.clone(), LifecycleController::new())
        .with_events(events_tx)
        .spawn();

    // When: Pressing key 255
    handle_key_press(u8::MAX, &scenes, &engine);

    // Then: The last scene's action reaches the remote
    loop {
        if let EngineEvent::SequenceFinished { executed, .. } = events.recv().await.unwrap() {
            assert_eq!(executed, 1);
            break;
        }
    }
    assert_eq!(remote.names(), vec!["SetCurrentProgramScene".to_string()]);
}
