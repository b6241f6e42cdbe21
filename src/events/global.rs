use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Workers;
use crate::app::handlers::{refresh_schedule, request_device_location};
use crate::state::{AppState, Modal, Tab};

/// What: Keys available on every tab.
///
/// Output:
/// - `true` when the key was consumed.
pub fn handle_global_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) -> bool {
    match ke.code {
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.tab = app.tab.next(),
        KeyCode::BackTab => app.tab = app.tab.previous(),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(idx) {
                app.tab = tab;
            }
        }
        KeyCode::Char('l') => {
            if app.locating {
                tracing::debug!("[Events] Locate ignored; request in flight");
            } else {
                request_device_location(app, workers);
            }
        }
        KeyCode::Char('m') => app.modal = Modal::manual_location(),
        KeyCode::Char('r') => refresh_schedule(app, workers, false),
        KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('?') => app.modal = Modal::Help,
        _ => return false,
    }
    true
}
