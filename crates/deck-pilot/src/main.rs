//! Deck-Pilot: Stream Deck and tray buttons that run OBS action macros.

mod app;
mod config;
mod deck;
mod error;
mod obs;
mod profiles;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_input;
mod tray_manager;

pub(crate) use {
    app::App,
    deck::DeckInput,
    error::{AppError, Result as AppResult},
    profiles::ProfileSet,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_input::TrayInput,
    tray_manager::{TrayAction, TrayManager},
};

use crate::config::Config;

use std::sync::{Arc, Mutex, PoisonError};

use deck_pilot_core::{Action, CommandKind};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tray_icon::menu::MenuEvent;

const DEFAULT_LOG_FILTER: &str = "deck_pilot=debug,deck_pilot_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let profiles = match ProfileSet::load(&config.profiles.path) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load profiles: {:?}", e);
            std::process::exit(1);
        }
    };

    let profile = match profiles.choose(
        config.profiles.default.as_deref(),
        std::io::stdin().lock(),
        std::io::stdout(),
    ) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to choose profile: {:?}", e);
            std::process::exit(1);
        }
    };

    if profile.scenes.is_empty() {
        error!(profile = %profile.name, "No scenes in the chosen profile");
        std::process::exit(1);
    }

    info!(profile = %profile.name, scene_count = profile.scenes.len(), "Profile selected");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = match runtime.block_on(App::start(&config, &profile)) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();
    let mut front_ends = 0;

    // Hardware front-end: device I/O runs on the runtime's blocking pool.
    if config.deck.enabled {
        match DeckInput::open(&config.deck) {
            Ok(Some(deck)) => {
                let deck = Arc::new(deck);
                if let Err(e) = deck.paint(&profile.scenes) {
                    warn!(error = ?e, "Failed to paint Stream Deck keys");
                }

                app.lifecycle.register(deck.clone());
                front_ends += 1;

                let engine = app.engine.clone();
                let scenes = profile.scenes.clone();
                runtime.spawn(async move {
                    if let Err(e) = deck.run(scenes, engine).await {
                        error!(error = ?e, "Stream Deck listener error");
                    }
                });
            }
            Ok(None) => warn!("No Stream Deck found"),
            Err(e) => error!(error = ?e, "Failed to open Stream Deck"),
        }
    }

    // On-screen front-end: menu clicks are delivered to the UI thread.
    if config.tray.enabled {
        app.lifecycle
            .register(Arc::new(TrayInput::new(tray_proxy.clone())));
        front_ends += 1;

        let menu_proxy = Mutex::new(tray_proxy.clone());
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            let _ = menu_proxy
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .send_event(TrayCommand::MenuClicked(event.id));
        }));

        runtime.spawn(App::forward_recording_state(
            app.engine.clone(),
            tray_proxy.clone(),
        ));
    }

    if front_ends == 0 {
        error!("No input front-end available (no Stream Deck and tray disabled)");
        std::process::exit(1);
    }

    runtime.spawn(App::watch_ctrl_c(app.lifecycle.clone()));

    let App {
        engine,
        lifecycle: _,
        worker,
    } = app;

    // The runtime lives on its own thread; the UI event loop owns the main thread.
    std::thread::spawn(move || {
        runtime.block_on(async {
            if let Err(e) = worker.await {
                error!(error = ?e, "Action engine task failed");
            }
        });
    });

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager: Option<TrayManager> = None;
    let tray_enabled = config.tray.enabled;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) if tray_enabled => {
                match TrayManager::new(&profile) {
                    Ok(tm) => tray_manager = Some(tm),
                    Err(e) => {
                        error!("Failed to create TrayManager: {:?}", e);
                        std::process::exit(1);
                    }
                }

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }
            }
            Event::UserEvent(TrayCommand::MenuClicked(id)) => {
                match tray_manager.as_ref().and_then(|tm| tm.action_for(&id)) {
                    Some(TrayAction::Scene(index)) => {
                        if let Some(scene) = profile.scene(index) {
                            let trigger_id = engine.on_trigger(scene.actions.clone());
                            info!(
                                scene = %scene.name,
                                trigger_id = %trigger_id,
                                "Tray button clicked"
                            );
                        }
                    }
                    Some(TrayAction::Quit) => {
                        info!("Quit clicked");
                        engine.on_trigger(vec![Action::new(CommandKind::Quit)]);
                    }
                    None => {}
                }
            }
            Event::UserEvent(TrayCommand::SetState(state)) => {
                if let Some(tm) = tray_manager.as_mut() {
                    if let Err(e) = tm.update_state(state) {
                        error!(error = ?e, "Failed to update tray icon");
                    }
                }
            }
            Event::UserEvent(TrayCommand::Shutdown) => {
                *control_flow = ControlFlow::ExitWithCode(0);
            }
            _ => {}
        }
    });
}
