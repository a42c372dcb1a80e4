//! Terminal `quit` handling.
//!
//! Releases every registered input source, then exits the process without
//! waiting on any blocking input loop.

use crate::InputSource;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info, instrument, warn};

/// Process exit function. Receives the exit code.
///
/// Production code uses [`std::process::exit`]; tests install a recorder.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

struct Inner {
    sources: Mutex<Vec<Arc<dyn InputSource>>>,
    exit: ExitHook,
}

/// Releases input sources and terminates the process on `quit`.
///
/// Cheap to clone; all clones share the same set of registered sources.
#[derive(Clone)]
pub struct LifecycleController {
    inner: Arc<Inner>,
}

impl LifecycleController {
    /// Controller that terminates with [`std::process::exit`].
    pub fn new() -> Self {
        Self::with_exit_hook(Arc::new(|code| std::process::exit(code)))
    }

    /// Controller with a custom exit function.
    pub fn with_exit_hook(exit: ExitHook) -> Self {
        Self {
            inner: Arc::new(Inner {
                sources: Mutex::new(Vec::new()),
                exit,
            }),
        }
    }

    /// Register an input source to be released on quit.
    pub fn register(&self, source: Arc<dyn InputSource>) {
        info!(source = source.name(), "Input source registered");
        self.inner
            .sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source);
    }

    /// Number of registered input sources.
    pub fn source_count(&self) -> usize {
        self.inner
            .sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Release every input source in registration order, then exit with code 0.
    ///
    /// A source that fails to release is logged and the remaining sources
    /// are still released. Only returns if the exit hook does.
    #[instrument(skip(self))]
    pub fn quit(&self) {
        warn!("Quit requested, releasing input sources");

        let sources: Vec<Arc<dyn InputSource>> = self
            .inner
            .sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for source in sources {
            match source.release_resources() {
                Ok(()) => info!(source = source.name(), "Input source released"),
                Err(e) => error!(source = source.name(), error = %e, "Failed to release input source"),
            }
        }

        info!("Exiting");
        (self.inner.exit)(0);
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}
