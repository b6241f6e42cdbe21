//! Keyboard handling for the TUI.
//!
//! Modals take every key while open; otherwise global keys are tried first and the
//! active tab gets the rest.

use crossterm::event::{Event as CEvent, KeyEvent, KeyEventKind};

use crate::app::Workers;
use crate::state::AppState;

mod global;
mod modals;
mod tabs;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Details:
/// - Sets `app.should_quit` when the user asks to exit.
/// - Only key presses are handled; releases, repeats, mouse and resize are ignored.
pub fn handle_event(ev: &CEvent, app: &mut AppState, workers: &Workers) {
    if let CEvent::Key(ke) = ev
        && ke.kind == KeyEventKind::Press
    {
        handle_key(*ke, app, workers);
    }
}

/// Route one key press.
pub fn handle_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    if !app.modal.is_none() {
        modals::handle_modal_key(ke, app, workers);
        return;
    }
    if global::handle_global_key(ke, app, workers) {
        return;
    }
    tabs::handle_tab_key(ke, app, workers);
}
