use crate::TrayIconState;

use tray_icon::menu::MenuId;

/// Events delivered to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so menu clicks, tray mutations and process lifecycle events all flow
/// through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// A tray menu item was clicked.
    MenuClicked(MenuId),
    /// Update the tray icon to a new state.
    SetState(TrayIconState),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
