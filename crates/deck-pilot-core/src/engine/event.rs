use crate::{ActionError, CommandKind, TriggerId};

/// Result of one action within a trigger's sequence.
#[derive(Debug)]
pub struct ActionOutcome {
    /// Trigger the action belongs to.
    pub trigger_id: TriggerId,
    /// Position of the action within its sequence.
    pub index: usize,
    /// Command that ran.
    pub command: CommandKind,
    /// `Err` carries the contained, non-fatal failure.
    pub result: Result<(), ActionError>,
}

/// Progress notifications published by the engine worker.
#[derive(Debug)]
pub enum EngineEvent {
    /// An action finished, successfully or not.
    ActionFinished(ActionOutcome),
    /// Every action of a trigger has run.
    SequenceFinished {
        /// Trigger whose sequence drained.
        trigger_id: TriggerId,
        /// Number of actions that ran.
        executed: usize,
    },
}
