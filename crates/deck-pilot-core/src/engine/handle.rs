use crate::Action;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifier of one trigger, used for log correlation.
pub type TriggerId = Uuid;

/// A queued action sequence.
#[derive(Debug)]
pub(crate) struct Trigger {
    pub(crate) id: TriggerId,
    pub(crate) actions: Vec<Action>,
}

/// Entry point for input sources.
///
/// Cloned into every front-end. Enqueuing never blocks, so a sequence that is
/// waiting out a delay never stops a front-end from accepting new triggers.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    pub(crate) trigger_tx: mpsc::UnboundedSender<Trigger>,
    pub(crate) recording_rx: watch::Receiver<bool>,
}

impl EngineHandle {
    /// Queue an action sequence.
    ///
    /// The whole sequence runs after every previously queued sequence has
    /// finished; sequences never interleave.
    pub fn on_trigger(&self, actions: Vec<Action>) -> TriggerId {
        let trigger_id = Uuid::new_v4();
        let action_count = actions.len();

        match self.trigger_tx.send(Trigger {
            id: trigger_id,
            actions,
        }) {
            Ok(()) => debug!(trigger_id = %trigger_id, action_count, "Trigger queued"),
            Err(_) => warn!(trigger_id = %trigger_id, "Action engine stopped, trigger dropped"),
        }

        trigger_id
    }

    /// Whether the session believes recording is active.
    pub fn is_recording(&self) -> bool {
        *self.recording_rx.borrow()
    }

    /// Receiver that is notified whenever the recording flag changes.
    pub fn recording_updates(&self) -> watch::Receiver<bool> {
        self.recording_rx.clone()
    }
}
