use crate::{AppResult, TrayCommand, TrayIconState, config::Config, obs::ObsClient};

use std::time::Duration;

use deck_pilot_core::{ActionEngine, EngineHandle, LifecycleController, Profile, RemoteControl};
use serde_json::{Map, Value};
use tao::event_loop::EventLoopProxy;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Time OBS gets to load a scene collection before buttons become usable.
pub(crate) const COLLECTION_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Running application core.
///
/// Lives on the async runtime. Front-ends get clones of `engine`; both
/// front-ends register with `lifecycle` so `quit` can release them.
pub struct App {
    pub(crate) engine: EngineHandle,
    pub(crate) lifecycle: LifecycleController,
    pub(crate) worker: JoinHandle<()>,
}

impl App {
    /// Connect to OBS, activate the profile's scene collection and start the
    /// action engine.
    #[instrument(skip(config, profile), fields(profile = %profile.name))]
    pub(crate) async fn start(config: &Config, profile: &Profile) -> AppResult<Self> {
        info!("Deck-Pilot starting");

        let client = ObsClient::connect(&config.obs).await?;

        if let Some(collection) = profile.scene_collection.as_deref() {
            switch_scene_collection(&client, collection).await;
        }

        let lifecycle = LifecycleController::new();
        let (engine, worker) = ActionEngine::new(client, lifecycle.clone()).spawn();

        Ok(Self {
            engine,
            lifecycle,
            worker,
        })
    }

    /// Release front-ends and exit on Ctrl+C.
    pub(crate) async fn watch_ctrl_c(lifecycle: LifecycleController) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted, shutting down");
                lifecycle.quit();
            }
            Err(e) => warn!(error = ?e, "Failed to listen for Ctrl+C"),
        }
    }

    /// Mirror the recording flag onto the tray icon.
    pub(crate) async fn forward_recording_state(
        engine: EngineHandle,
        tray_proxy: EventLoopProxy<TrayCommand>,
    ) {
        let mut updates = engine.recording_updates();

        while updates.changed().await.is_ok() {
            let state = TrayIconState::from_recording(*updates.borrow_and_update());
            if tray_proxy.send_event(TrayCommand::SetState(state)).is_err() {
                debug!("Tray event loop closed, stopping recording forwarder");
                break;
            }
        }
    }
}

/// Ask OBS to switch scene collection, then give it time to load.
///
/// Failure is logged; the buttons still work against whatever collection is
/// active.
#[instrument(skip(client))]
pub(crate) async fn switch_scene_collection<C: RemoteControl>(client: &C, collection: &str) {
    let mut params = Map::new();
    params.insert(
        "sceneCollectionName".to_string(),
        Value::String(collection.to_string()),
    );

    match client.send_raw("SetCurrentSceneCollection", params).await {
        Ok(_) => {
            info!(collection, "Scene collection set");
            tokio::time::sleep(COLLECTION_SETTLE_DELAY).await;
        }
        Err(e) => error!(collection, error = %e, "Failed to switch scene collection"),
    }
}
