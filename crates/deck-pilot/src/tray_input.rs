use crate::TrayCommand;

use std::{
    error::Error,
    sync::{Mutex, PoisonError},
};

use deck_pilot_core::InputSource;
use tao::event_loop::EventLoopProxy;

/// The tray menu front-end as seen by the lifecycle controller.
///
/// Releasing it asks the UI event loop to exit, which removes the tray icon.
pub struct TrayInput {
    proxy: Mutex<EventLoopProxy<TrayCommand>>,
}

impl TrayInput {
    /// Wrap the proxy of the event loop that owns the tray.
    pub fn new(proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl InputSource for TrayInput {
    fn name(&self) -> &str {
        "tray"
    }

    fn release_resources(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.proxy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .send_event(TrayCommand::Shutdown)
            .map_err(|_| "tray event loop already closed".into())
    }
}
