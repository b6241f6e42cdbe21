use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Workers;
use crate::app::handlers::play_url;
use crate::qibla::normalize_degrees;
use crate::quran::next_translation;
use crate::state::{AppState, Modal, Tab};

/// Rotation step for the keyboard heading.
const HEADING_STEP: f64 = 5.0;
/// Rotation step with Shift held.
const HEADING_STEP_FAST: f64 = 15.0;

/// Dispatch a key to the active tab.
pub fn handle_tab_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    match app.tab {
        Tab::Prayer => {}
        Tab::Qibla => handle_qibla_key(ke, app, workers),
        Tab::Quran => handle_quran_key(ke, app, workers),
        Tab::Adhkar => match ke.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.adhkar_scroll = app.adhkar_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => app.adhkar_scroll += 1,
            _ => {}
        },
        Tab::Hadith => handle_hadith_key(ke, app, workers),
    }
}

/// What: Qibla tab keys.
///
/// Details:
/// - `o` starts orientation tracking once; repeated presses while pending or
///   active are ignored.
/// - Left/Right rotate the keyboard heading when that sensor is in use.
fn handle_qibla_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    match ke.code {
        KeyCode::Char('o') => {
            if app.qibla.begin_tracking() {
                app.set_status("جاري تفعيل البوصلة…");
                workers.start_tracking();
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if app.manual_heading.is_none() {
                return;
            }
            if !app.qibla.is_tracking() {
                app.set_status("اضغط o لتفعيل البوصلة");
                return;
            }
            let step = if ke.modifiers.contains(KeyModifiers::SHIFT) {
                HEADING_STEP_FAST
            } else {
                HEADING_STEP
            };
            let delta = if ke.code == KeyCode::Left { -step } else { step };
            let heading = normalize_degrees(app.qibla.heading().unwrap_or(0.0) + delta);
            if let Some(tx) = &app.manual_heading
                && tx.send(heading).is_err()
            {
                tracing::debug!("[Qibla] Keyboard heading receiver gone");
            }
        }
        _ => {}
    }
}

/// What: Select surah `number`, stop audio and start loading it.
///
/// Details:
/// - Out-of-range numbers are ignored.
pub fn select_surah(app: &mut AppState, workers: &Workers, number: u32) {
    if !app.quran.select(number, &mut app.store) {
        return;
    }
    app.player.stop();
    workers.load_surah(number, app.quran.translation.clone());
}

fn handle_quran_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    match ke.code {
        KeyCode::Char(']') => {
            let next = app.quran.current + 1;
            select_surah(app, workers, next);
        }
        KeyCode::Char('[') => {
            let previous = app.quran.current.saturating_sub(1);
            select_surah(app, workers, previous);
        }
        KeyCode::Char('/') => {
            app.modal = Modal::SurahPicker {
                query: String::new(),
                selected: 0,
            };
        }
        KeyCode::Char('t') => {
            app.quran.translation = next_translation(&app.quran.translation).to_string();
            app.quran.loading = true;
            app.player.stop();
            tracing::info!(translation = %app.quran.translation, "[Quran] Translation changed");
            workers.load_surah(app.quran.current, app.quran.translation.clone());
        }
        KeyCode::Char(' ') => match app.quran.queue.toggle() {
            Some(url) => play_url(app, &url),
            None => {
                app.player.stop();
                app.set_status("متوقف مؤقتًا");
            }
        },
        KeyCode::Char('n') => {
            if let Some(url) = app.quran.queue.next() {
                play_url(app, &url);
            }
        }
        KeyCode::Char('p') => {
            if let Some(url) = app.quran.queue.previous() {
                play_url(app, &url);
            }
        }
        KeyCode::Char('a') => {
            if let Some(url) = app.quran.queue.play_surah() {
                play_url(app, &url);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.quran.scroll = app.quran.scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => app.quran.scroll += 1,
        _ => {}
    }
}

fn handle_hadith_key(ke: KeyEvent, app: &mut AppState, workers: &Workers) {
    match ke.code {
        KeyCode::Left => {
            let range = app.hadith.previous_page();
            workers.load_hadith_page(app.hadith.book_id.clone(), range);
        }
        KeyCode::Right => {
            let range = app.hadith.next_page();
            workers.load_hadith_page(app.hadith.book_id.clone(), range);
        }
        KeyCode::Char('b') => {
            if let Some(book) = app.hadith.cycle_book() {
                workers.load_hadith_page(book, app.hadith.range);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.hadith.scroll = app.hadith.scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => app.hadith.scroll += 1,
        _ => {}
    }
}
