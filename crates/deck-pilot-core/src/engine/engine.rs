//! Action execution engine.
//!
//! A single worker task owns the remote session and the [`SessionState`] and
//! consumes whole action sequences from a queue, one after another. Every
//! remote call therefore happens on that task, at most one at a time, and a
//! sequence's delays hold back only the sequences queued behind it.

use crate::{
    Action, ActionError, ActionOutcome, CommandKind, EngineEvent, EngineHandle,
    LifecycleController, RemoteControl, SessionState, TriggerId, engine::Trigger,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep},
};
use tracing::{debug, info, instrument, warn};

/// Wait between a `stop_stream` action starting and the stop request.
///
/// Applied before the remote call and independent of the action's own delay.
pub const STOP_STREAM_GRACE: Duration = Duration::from_secs(30);

const SCENE_NAME: &str = "sceneName";
const SOURCE_NAME: &str = "sourceName";

/// Interprets action sequences against a [`RemoteControl`] session.
pub struct ActionEngine<C> {
    client: C,
    session: SessionState,
    lifecycle: LifecycleController,
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
    halted: bool,
}

impl<C: RemoteControl + 'static> ActionEngine<C> {
    /// Create an engine over a connected session.
    pub fn new(client: C, lifecycle: LifecycleController) -> Self {
        Self {
            client,
            session: SessionState::new(),
            lifecycle,
            events: None,
            halted: false,
        }
    }

    /// Publish [`EngineEvent`]s on `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Read access to the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether a `quit` action has run.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Move the engine onto its own worker task.
    ///
    /// Must be called within a tokio runtime. The worker ends after a `quit`
    /// action, or once every [`EngineHandle`] is dropped and the queue drained.
    pub fn spawn(self) -> (EngineHandle, JoinHandle<()>) {
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
        let handle = EngineHandle {
            trigger_tx,
            recording_rx: self.session.subscribe(),
        };

        let worker = tokio::spawn(self.run(trigger_rx));

        (handle, worker)
    }

    async fn run(mut self, mut trigger_rx: mpsc::UnboundedReceiver<Trigger>) {
        info!("Action engine started");

        while let Some(Trigger { id, actions }) = trigger_rx.recv().await {
            self.execute_trigger(id, &actions).await;

            if self.halted {
                info!("Action engine halted by quit");
                return;
            }
        }

        info!("All engine handles dropped, action engine stopped");
    }

    /// Execute an action sequence in order.
    ///
    /// Failures are contained per action and reported; the sequence only ends
    /// early when a `quit` action runs.
    pub async fn execute(&mut self, actions: &[Action]) {
        self.execute_trigger(TriggerId::new_v4(), actions).await;
    }

    #[instrument(skip(self, actions), fields(trigger_id = %trigger_id, action_count = actions.len()))]
    async fn execute_trigger(&mut self, trigger_id: TriggerId, actions: &[Action]) {
        let started = Instant::now();
        let mut executed = 0;

        for (index, action) in actions.iter().enumerate() {
            let result = self.run_action(action).await;
            executed += 1;

            match &result {
                Ok(()) => debug!(index, command = %action.command, "Action complete"),
                Err(e) => warn!(index, command = %action.command, error = %e, "Action failed"),
            }

            self.publish(EngineEvent::ActionFinished(ActionOutcome {
                trigger_id,
                index,
                command: action.command.clone(),
                result,
            }));

            if self.halted {
                return;
            }

            if let Some(delay) = action.delay() {
                debug!(index, delay_ms = action.delay_ms, "Delaying next action");
                sleep(delay).await;
            }
        }

        info!(
            executed,
            duration_ms = started.elapsed().as_millis(),
            "Action sequence finished"
        );

        self.publish(EngineEvent::SequenceFinished {
            trigger_id,
            executed,
        });
    }

    async fn run_action(&mut self, action: &Action) -> Result<(), ActionError> {
        let command = &action.command;

        match command {
            CommandKind::SetScene => {
                let scene = action
                    .str_param(SCENE_NAME)
                    .ok_or_else(|| ActionError::missing(command, SCENE_NAME))?;

                self.client
                    .set_current_scene(scene)
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                info!(scene, "Switched scene");
            }
            CommandKind::ShowSource | CommandKind::HideSource => {
                let visible = *command == CommandKind::ShowSource;
                let scene = action
                    .str_param(SCENE_NAME)
                    .ok_or_else(|| ActionError::missing(command, SCENE_NAME))?;
                let source = action
                    .str_param(SOURCE_NAME)
                    .ok_or_else(|| ActionError::missing(command, SOURCE_NAME))?;

                let items = self
                    .client
                    .list_scene_items(scene)
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                let item = items
                    .iter()
                    .find(|item| item.source_name == source)
                    .ok_or_else(|| ActionError::TargetNotFound {
                        scene_name: scene.to_string(),
                        source_name: source.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                self.client
                    .set_source_visible(scene, item.item_id, visible)
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                info!(scene, source, visible, "Source visibility set");
            }
            CommandKind::ToggleRecord => {
                self.client
                    .toggle_recording()
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                let recording = !self.session.is_recording();
                self.session.set_recording(recording);

                if recording {
                    info!("Recording started");
                } else {
                    info!("Recording stopped");
                }
            }
            CommandKind::StartStream => {
                self.client
                    .start_streaming()
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                info!("Streaming started");
            }
            CommandKind::StopStream => {
                info!(
                    grace_secs = STOP_STREAM_GRACE.as_secs(),
                    "Waiting before stopping stream"
                );
                sleep(STOP_STREAM_GRACE).await;

                self.client
                    .stop_streaming()
                    .await
                    .map_err(|e| ActionError::remote(command, e))?;

                info!("Streaming stopped");
            }
            CommandKind::Quit => {
                self.halted = true;
                self.lifecycle.quit();
            }
            CommandKind::Unrecognized(text) => {
                return Err(ActionError::UnknownCommand {
                    command: text.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(())
    }

    fn publish(&self, event: EngineEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver just means nobody is listening.
            let _ = events.send(event);
        }
    }
}
