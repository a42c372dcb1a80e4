//! On-screen front-end: a system tray menu with one item per scene.
//!
//! Clicking a scene item triggers that scene's actions; "Quit" triggers the
//! quit command. The icon colour follows the recording flag.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use deck_pilot_core::Profile;
use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;
const IDLE_COLOR: [u8; 3] = [90, 90, 90];
const RECORDING_COLOR: [u8; 3] = [200, 30, 30];

/// What a clicked tray menu item stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    /// Run the scene at this index.
    Scene(usize),
    /// Run the quit command.
    Quit,
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    profile_name: String,
    scene_item_ids: Vec<MenuId>,
    quit_item_id: MenuId,
}

impl TrayManager {
    /// Build the tray menu for `profile`.
    #[track_caller]
    #[instrument(skip(profile), fields(profile = %profile.name))]
    pub fn new(profile: &Profile) -> AppResult<Self> {
        let menu = Menu::new();
        let mut scene_item_ids = Vec::with_capacity(profile.scenes.len());

        for scene in &profile.scenes {
            let item = MenuItem::new(&scene.name, true, None);
            scene_item_ids.push(item.id().clone());
            menu.append(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add menu item '{}': {}", scene.name, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let quit_item = MenuItem::new("Quit", true, None);
        let quit_item_id = quit_item.id().clone();

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add separator: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        menu.append(&quit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add quit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(&profile.name, TrayIconState::Idle))
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(scene_count = scene_item_ids.len(), "System tray menu initialized");

        Ok(Self {
            tray_icon,
            profile_name: profile.name.clone(),
            scene_item_ids,
            quit_item_id,
        })
    }

    /// Update the tray icon state with new icon and tooltip.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(tooltip(&self.profile_name, state)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    /// Resolve a clicked menu item.
    pub fn action_for(&self, id: &MenuId) -> Option<TrayAction> {
        if *id == self.quit_item_id {
            return Some(TrayAction::Quit);
        }

        self.scene_item_ids
            .iter()
            .position(|scene_id| scene_id == id)
            .map(TrayAction::Scene)
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        Icon::from_rgba(icon_rgba(state), ICON_SIZE, ICON_SIZE).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Tooltip text for a state.
pub(crate) fn tooltip(profile_name: &str, state: TrayIconState) -> String {
    match state {
        TrayIconState::Idle => format!("Deck-Pilot - {}", profile_name),
        TrayIconState::Recording => format!("Deck-Pilot - {} (recording)", profile_name),
    }
}

/// A filled circle on a transparent square, coloured by state.
pub(crate) fn icon_rgba(state: TrayIconState) -> Vec<u8> {
    let [r, g, b] = match state {
        TrayIconState::Idle => IDLE_COLOR,
        TrayIconState::Recording => RECORDING_COLOR,
    };

    let center = ICON_SIZE as f32 / 2.0;
    let radius_sq = (center - 1.0) * (center - 1.0);
    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let alpha = if dx * dx + dy * dy <= radius_sq { 255 } else { 0 };
            rgba.extend_from_slice(&[r, g, b, alpha]);
        }
    }

    rgba
}
