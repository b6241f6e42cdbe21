use crossterm::event::{KeyCode, KeyEvent};

use crate::app::Workers;
use crate::app::handlers::request_place_location;
use crate::events::tabs::select_surah;
use crate::quran::filter_surahs;
use crate::state::{AppState, ManualField, Modal};

/// What: Keys while a modal is open.
///
/// Details:
/// - Alert and Help close on Enter/Esc.
/// - The manual form edits the focused field; Tab switches fields; Enter submits.
/// - The surah picker filters as you type; Up/Down move; Enter opens the surah.
pub fn handle_modal_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    match &mut app.modal {
        Modal::None => {}
        Modal::Alert { .. } | Modal::Help => {
            if matches!(ke.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                app.modal = Modal::None;
            }
        }
        Modal::ManualLocation {
            city,
            country,
            field,
        } => match ke.code {
            KeyCode::Esc => app.modal = Modal::None,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                *field = field.toggled();
            }
            KeyCode::Backspace => {
                match field {
                    ManualField::City => city.pop(),
                    ManualField::Country => country.pop(),
                };
            }
            KeyCode::Char(ch) => match field {
                ManualField::City => city.push(ch),
                ManualField::Country => country.push(ch),
            },
            KeyCode::Enter => {
                let (city, country) = (city.clone(), country.clone());
                app.modal = Modal::None;
                request_place_location(app, workers, &city, &country);
            }
            _ => {}
        },
        Modal::SurahPicker { query, selected } => match ke.code {
            KeyCode::Esc => app.modal = Modal::None,
            KeyCode::Up => *selected = selected.saturating_sub(1),
            KeyCode::Down => {
                let count = filter_surahs(&app.quran.surahs, query).len();
                if *selected + 1 < count {
                    *selected += 1;
                }
            }
            KeyCode::Backspace => {
                query.pop();
                *selected = 0;
            }
            KeyCode::Char(ch) => {
                query.push(ch);
                *selected = 0;
            }
            KeyCode::Enter => {
                let picked = filter_surahs(&app.quran.surahs, query)
                    .get(*selected)
                    .and_then(|&i| app.quran.surahs.get(i))
                    .map(|s| s.number);
                app.modal = Modal::None;
                if let Some(number) = picked {
                    select_surah(app, workers, number);
                }
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::handle_modal_key;
    use crate::app::Workers;
    use crate::location::device::DisabledPositionProvider;
    use crate::prayer::countdown::local_now;
    use crate::qibla::sensor::ManualSensor;
    use crate::state::{AppState, ManualField, Modal};
    use crate::store::KeyValueStore;
    use crate::theme::Settings;

    fn fixture() -> (AppState, Workers) {
        let app = AppState::new(KeyValueStore::in_memory(), Settings::default(), local_now);
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let (sensor, _heading) = ManualSensor::new();
        let workers = Workers::new(
            None,
            std::sync::Arc::new(DisabledPositionProvider),
            std::sync::Arc::new(sensor),
            "UTC".into(),
            tx,
        );
        (app, workers)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    /// What: Typing fills the focused field and Tab switches fields.
    ///
    /// Inputs:
    /// - "Ca", Tab, "Eg", Backspace.
    ///
    /// Output:
    /// - City "Ca", country "E", focus on country.
    fn manual_form_editing() {
        let (mut app, workers) = fixture();
        app.modal = Modal::manual_location();
        for code in [
            KeyCode::Char('C'),
            KeyCode::Char('a'),
            KeyCode::Tab,
            KeyCode::Char('E'),
            KeyCode::Char('g'),
            KeyCode::Backspace,
        ] {
            handle_modal_key(key(code), &mut app, &workers);
        }
        assert_eq!(
            app.modal,
            Modal::ManualLocation {
                city: "Ca".into(),
                country: "E".into(),
                field: ManualField::Country,
            }
        );
    }

    #[test]
    /// What: Submitting a blank form raises the "enter city and country" alert.
    ///
    /// Inputs:
    /// - Empty form, Enter.
    ///
    /// Output:
    /// - Alert modal; no request started.
    fn manual_form_blank_submit_alerts() {
        let (mut app, workers) = fixture();
        app.modal = Modal::manual_location();
        handle_modal_key(key(KeyCode::Enter), &mut app, &workers);
        assert!(matches!(app.modal, Modal::Alert { .. }));
        assert!(!app.locating);
    }
}
