#[allow(clippy::module_inception)]
mod engine;
mod event;
mod handle;
mod session_state;

pub(crate) use handle::Trigger;

pub use {
    engine::{ActionEngine, STOP_STREAM_GRACE},
    event::{ActionOutcome, EngineEvent},
    handle::{EngineHandle, TriggerId},
    session_state::SessionState,
};
