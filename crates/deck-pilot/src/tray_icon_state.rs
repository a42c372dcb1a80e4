/// Tray icon states mirroring the advisory recording flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Not recording.
    Idle,
    /// Recording is believed to be active.
    Recording,
}

impl TrayIconState {
    /// State for a recording flag value.
    pub fn from_recording(recording: bool) -> Self {
        if recording {
            TrayIconState::Recording
        } else {
            TrayIconState::Idle
        }
    }
}
