//! Deck-Pilot Core Library
//!
//! Action execution engine that turns button triggers into ordered sequences
//! of remote-control commands against a live broadcasting application.
//!
//! Triggers from any number of input sources are funnelled through a single
//! worker task that owns the [`RemoteControl`] session and the
//! [`SessionState`], so remote calls from different triggers never interleave.
//!
//! # Example
//!
//! ```no_run
//! use deck_pilot_core::{Action, ActionEngine, CommandKind, LifecycleController, RemoteControl};
//!
//! async fn wire<C: RemoteControl + 'static>(client: C) {
//!     let lifecycle = LifecycleController::new();
//!     let (handle, _worker) = ActionEngine::new(client, lifecycle).spawn();
//!
//!     handle.on_trigger(vec![
//!         Action::new(CommandKind::SetScene).with_param("sceneName", "Intro"),
//!         Action::new(CommandKind::StartStream).with_delay_ms(500),
//!     ]);
//! }
//! ```

mod engine;
mod error;
mod lifecycle;
mod model;
mod remote;

pub use {
    engine::{
        ActionEngine, ActionOutcome, EngineEvent, EngineHandle, STOP_STREAM_GRACE, SessionState,
        TriggerId,
    },
    error::{ActionError, RemoteError, RemoteResult},
    lifecycle::{ExitHook, InputSource, LifecycleController},
    model::{Action, CommandKind, Profile, Rgb, Scene},
    remote::{RemoteControl, SceneItem},
};

#[cfg(test)]
mod tests;
