use std::error::Error;

/// A front-end that turns raw triggers into engine calls.
///
/// Implemented by the hardware key-event adapter and the on-screen adapter.
/// The only thing the core ever asks of a source is to let go of what it
/// holds before the process exits.
pub trait InputSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Release exclusively held resources (reset and close a device, close a
    /// window). Called once, right before the process exits.
    fn release_resources(&self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
