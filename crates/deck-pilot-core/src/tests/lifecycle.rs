use crate::{InputSource, LifecycleController};

use std::{
    error::Error,
    sync::{Arc, Mutex},
};

struct RecordingSource {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl InputSource for RecordingSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[allow(clippy::unwrap_used)]
    fn release_resources(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log.lock().unwrap().push(format!("release:{}", self.name));
        if self.fail {
            return Err("device already gone".into());
        }
        Ok(())
    }
}

fn source(name: &str, log: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<dyn InputSource> {
    Arc::new(RecordingSource {
        name: name.to_string(),
        log: Arc::clone(log),
        fail,
    })
}

/// WHAT: Quit releases every source before exiting
/// WHY: The hardware must not be left lit when the process goes away
#[test]
#[allow(clippy::unwrap_used)]
fn given_registered_sources_when_quit_then_released_in_order_before_exit() {
    // Given: Two registered sources and an exit recorder
    let log = Arc::new(Mutex::new(Vec::new()));
    let exit_log = Arc::clone(&log);
    let lifecycle = LifecycleController::with_exit_hook(Arc::new(move |code| {
        exit_log.lock().unwrap().push(format!("exit:{code}"));
    }));
    lifecycle.register(source("deck", &log, false));
    lifecycle.register(source("tray", &log, false));

    // When: Quitting
    lifecycle.quit();

    // Then: Sources are released in registration order, then exit(0)
    assert_eq!(
        *log.lock().unwrap(),
        vec!["release:deck", "release:tray", "exit:0"]
    );
}

/// WHAT: A failing release does not prevent the rest or the exit
/// WHY: Quit must always terminate the process
#[test]
#[allow(clippy::unwrap_used)]
fn given_failing_source_when_quit_then_remaining_sources_released_and_exit_called() {
    // Given: A failing source registered before a healthy one
    let log = Arc::new(Mutex::new(Vec::new()));
    let exit_log = Arc::clone(&log);
    let lifecycle = LifecycleController::with_exit_hook(Arc::new(move |code| {
        exit_log.lock().unwrap().push(format!("exit:{code}"));
    }));
    lifecycle.register(source("deck", &log, true));
    lifecycle.register(source("tray", &log, false));

    // When: Quitting
    lifecycle.quit();

    // Then: Both releases are attempted and exit still happens
    assert_eq!(
        *log.lock().unwrap(),
        vec!["release:deck", "release:tray", "exit:0"]
    );
    assert_eq!(lifecycle.source_count(), 0);
}

/// WHAT: Clones share the registered sources
/// WHY: The engine holds a clone while front-ends register later
#[test]
fn given_clone_when_registering_then_visible_through_every_clone() {
    // Given: A controller and its clone
    let lifecycle = LifecycleController::with_exit_hook(Arc::new(|_| {}));
    let clone = lifecycle.clone();
    let log = Arc::new(Mutex::new(Vec::new()));

    // When: Registering through the clone
    clone.register(source("deck", &log, false));

    // Then: The first controller sees it
    assert_eq!(lifecycle.source_count(), 1);
}
