use tokio::sync::watch;
use tracing::debug;

/// Session state the remote application does not own for us.
///
/// `is_recording` is a local mirror of the remote recording status. It is never
/// queried from the remote side, so it drifts if another controller toggles
/// recording. It is advisory only and has no effect on remote calls.
///
/// Owned by the engine worker; the only mutation is the `toggle_record`
/// handler. Observers get a read-only [`watch::Receiver`].
#[derive(Debug)]
pub struct SessionState {
    is_recording: bool,
    recording_tx: watch::Sender<bool>,
}

impl SessionState {
    /// Fresh state: not recording.
    pub fn new() -> Self {
        let (recording_tx, _) = watch::channel(false);
        Self {
            is_recording: false,
            recording_tx,
        }
    }

    /// Whether we believe the remote application is recording.
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Subscribe to recording flag changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.recording_tx.subscribe()
    }

    pub(crate) fn set_recording(&mut self, recording: bool) {
        self.is_recording = recording;
        self.recording_tx.send_replace(recording);
        debug!(is_recording = recording, "Session recording flag updated");
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
