//! Hardware key-event front-end.
//!
//! Opens the first Stream Deck found, paints one key per scene and turns key
//! presses into engine triggers.

use crate::{AppError, AppResult, config::DeckConfig, deck::key_image};

use std::{
    error::Error,
    fmt::Display,
    panic::Location,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use deck_pilot_core::{EngineHandle, InputSource, Scene};
use elgato_streamdeck::{DeviceStateUpdate, StreamDeck, list_devices, new_hidapi};
use error_location::ErrorLocation;
use tokio::{
    runtime::{Handle, RuntimeFlavor},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument, warn};

/// How long one blocking device read waits before checking for shutdown.
const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// An opened Stream Deck acting as an input source.
pub struct DeckInput {
    deck: Mutex<Option<Arc<StreamDeck>>>,
    serial: String,
    key_count: u8,
    shutdown_tx: watch::Sender<bool>,
}

impl DeckInput {
    /// Open the first connected Stream Deck, reset it and set its brightness.
    ///
    /// Returns `Ok(None)` when no device is connected.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn open(config: &DeckConfig) -> AppResult<Option<Self>> {
        let hid = new_hidapi().map_err(|e| AppError::DeviceError {
            reason: format!("Failed to initialise HID: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let Some((kind, serial)) = list_devices(&hid).into_iter().next() else {
            return Ok(None);
        };

        let deck =
            StreamDeck::connect(&hid, kind, &serial).map_err(|e| AppError::DeviceError {
                reason: format!("Failed to open Stream Deck {}: {}", serial, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        deck.reset().map_err(|e| AppError::DeviceError {
            reason: format!("Failed to reset Stream Deck: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        deck.set_brightness(config.brightness_percent())
            .map_err(|e| AppError::DeviceError {
                reason: format!("Failed to set brightness: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let key_count = kind.key_count();
        info!(serial = %serial, key_count, "Stream Deck opened");

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Some(Self {
            deck: Mutex::new(Some(Arc::new(deck))),
            serial,
            key_count,
            shutdown_tx,
        }))
    }

    fn device(&self) -> Option<Arc<StreamDeck>> {
        self.deck
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Paint key i with scene i's colours. Scenes beyond the key count are
    /// not reachable from the device.
    #[track_caller]
    #[instrument(skip(self, scenes))]
    pub fn paint(&self, scenes: &[Scene]) -> AppResult<()> {
        let Some(deck) = self.device() else {
            return Ok(());
        };

        if scenes.len() > usize::from(self.key_count) {
            warn!(
                scene_count = scenes.len(),
                key_count = self.key_count,
                "More scenes than keys, extra scenes are tray-only"
            );
        }

        let size = deck.kind().key_image_format().size;

        for (key, scene) in (0..self.key_count).zip(scenes) {
            deck.set_button_image(key, key_image(scene, size))
                .map_err(|e| AppError::DeviceError {
                    reason: format!("Failed to set image for key {}: {}", key, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            debug!(key, scene = %scene.name, color = ?scene.color, "Key painted");
        }

        deck.flush().map_err(|e| AppError::DeviceError {
            reason: format!("Failed to flush key images: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Keys painted");

        Ok(())
    }

    /// Listen for key presses until released.
    ///
    /// Key i triggers scene i's actions. Presses of unbound keys are ignored.
    #[instrument(skip(self, scenes, engine))]
    pub async fn run(&self, scenes: Vec<Scene>, engine: EngineHandle) -> AppResult<()> {
        let Some(deck) = self.device() else {
            return Ok(());
        };

        let reader = deck.get_reader();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let reader_shutdown_rx = self.shutdown_tx.subscribe();
        let (key_tx, mut key_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards key-down events.
        // The read timeout bounds how long it takes to notice shutdown.
        let handle = tokio::task::spawn_blocking(move || {
            forward_key_presses(
                || reader.read(Some(READ_TIMEOUT)),
                key_tx,
                reader_shutdown_rx,
            );
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Stream Deck listener shutting down");
                    break;
                }
                Some(key) = key_rx.recv() => {
                    handle_key_press(key, &scenes, &engine);
                }
                else => break,
            }
        }

        drop(key_rx);

        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Stream Deck reader stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Stream Deck reader task panicked"),
            Err(_) => debug!("Stream Deck reader did not stop within timeout"),
        }

        drop(deck);
        debug!("Stream Deck listener released its device handle");

        Ok(())
    }
}

/// Forward key-down events returned by `read` until shutdown is signalled,
/// a read fails or the receiver is dropped.
pub(crate) fn forward_key_presses<E: Display>(
    mut read: impl FnMut() -> Result<Vec<DeviceStateUpdate>, E>,
    key_tx: mpsc::Sender<u8>,
    shutdown_rx: watch::Receiver<bool>,
) {
    while !key_tx.is_closed() && !*shutdown_rx.borrow() {
        let updates = match read() {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "Stream Deck read failed, stopping listener");
                return;
            }
        };

        for update in updates {
            if let DeviceStateUpdate::ButtonDown(key) = update {
                if key_tx.blocking_send(key).is_err() {
                    return;
                }
            }
        }
    }
}

/// Trigger the scene bound to `key`, if any.
pub(crate) fn handle_key_press(key: u8, scenes: &[Scene], engine: &EngineHandle) {
    match scenes.get(usize::from(key)) {
        Some(scene) => {
            let trigger_id = engine.on_trigger(scene.actions.clone());
            info!(
                key = u16::from(key) + 1,
                scene = %scene.name,
                trigger_id = %trigger_id,
                "Button pressed"
            );
        }
        None => debug!(key, "Unbound key pressed"),
    }
}

impl InputSource for DeckInput {
    fn name(&self) -> &str {
        &self.serial
    }

    /// Stops the listener and blanks the keys before returning.
    ///
    /// The listener and its reader drop their handle clones once they see the
    /// shutdown signal; process exit closes the HID device if they have not.
    fn release_resources(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.shutdown_tx.send_replace(true);

        let Some(deck) = self
            .deck
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return Ok(());
        };

        // The HID write blocks; keep it off the async workers when on one.
        match Handle::try_current() {
            Ok(runtime) if runtime.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| deck.reset())?
            }
            _ => deck.reset()?,
        }
        info!(serial = %self.serial, "Stream Deck reset and closed");

        Ok(())
    }
}
