//! Applying worker results and controller actions to [`AppState`].
//!
//! Results tagged with a superseded request sequence or location generation are logged
//! and dropped without touching state.

use tokio::sync::mpsc;

use super::messages::WorkerMsg;
use super::workers::Workers;
use crate::error::NoorError;
use crate::location::Coordinates;
use crate::prayer::countdown::{CountdownEvent, CountdownUpdate};
use crate::state::{AppState, Modal};

/// Status line after a failed background refresh.
const REFRESH_FAILED: &str = "تعذر تحديث المواقيت. اضغط r لإعادة المحاولة.";

/// What: Start locating via the device capability.
///
/// Details:
/// - Any earlier in-flight request is superseded.
pub fn request_device_location(app: &mut AppState, workers: &Workers) {
    let seq = app.location.begin_request();
    app.locating = true;
    app.set_status("جاري تحديد الموقع…");
    tracing::info!(seq, "[Location] Device request started");
    workers.resolve_device(seq);
}

/// What: Start locating from a typed city and country.
///
/// Details:
/// - Blank inputs raise an alert instead of a request.
pub fn request_place_location(app: &mut AppState, workers: &Workers, city: &str, country: &str) {
    let (city, country) = (city.trim(), country.trim());
    if city.is_empty() || country.is_empty() {
        app.modal = Modal::Alert {
            message: "أدخل المدينة والدولة".to_string(),
        };
        return;
    }
    let seq = app.location.begin_request();
    app.locating = true;
    app.set_status("جاري البحث عن الموقع…");
    tracing::info!(seq, city, country, "[Location] Place request started");
    workers.resolve_place(seq, city.to_string(), country.to_string());
}

/// What: Commit `coords` and start the dependent fetches.
///
/// Inputs:
/// - `label`: Provisional label; `None` shows the coordinate fallback until the
///   reverse-geocoded label arrives.
pub fn commit_location(
    app: &mut AppState,
    workers: &Workers,
    coords: Coordinates,
    label: Option<String>,
) {
    let generation = app.location.commit(coords, label, &mut app.store);
    workers.location_pipeline(generation, coords);
}

/// Reload the schedule for the current location.
pub fn refresh_schedule(app: &mut AppState, workers: &Workers, background: bool) {
    if let Some(coords) = app.location.coordinates() {
        if !background {
            app.set_status("جاري تحديث المواقيت…");
        }
        workers.reload_schedule(app.location.generation(), coords, background);
    }
}

/// Show an error, appending to an alert that is already open.
fn alert(app: &mut AppState, err: &NoorError) {
    if let Modal::Alert { message } = &mut app.modal {
        tracing::warn!(error = %err, "[State] Alert");
        message.push('\n');
        message.push_str(&err.user_message());
    } else {
        app.alert(err);
    }
}

/// What: Hand `url` to the audio player.
///
/// Details:
/// - Without a player the URL is shown in the status line.
pub fn play_url(app: &mut AppState, url: &str) {
    match app.player.play(url) {
        Ok(true) => {
            let label = app.quran.audio_label();
            app.set_status(label);
        }
        Ok(false) => app.set_status(format!("لا يوجد مشغل صوت: {url}")),
        Err(e) => alert(app, &e),
    }
}

/// What: Apply one worker result.
///
/// Inputs:
/// - `app`: State to update.
/// - `msg`: Worker result.
/// - `workers`: Used to start follow-up work (pipeline after a resolution).
/// - `countdown_tx`: Channel for the countdown restarted by a new schedule.
pub fn handle_worker_msg(
    app: &mut AppState,
    msg: WorkerMsg,
    workers: &Workers,
    countdown_tx: &mpsc::UnboundedSender<CountdownEvent>,
) {
    match msg {
        WorkerMsg::Resolved { seq, result } => {
            if !app.location.is_latest_request(seq) {
                tracing::debug!(seq, "[Location] Dropping superseded resolution");
                return;
            }
            app.locating = false;
            app.status = None;
            match result {
                Ok((coords, label)) => commit_location(app, workers, coords, label),
                Err(e) => alert(app, &e),
            }
        }
        WorkerMsg::Label { generation, label } => {
            if !app.location.apply_label(generation, label) {
                tracing::debug!(generation, "[Location] Dropping stale label");
            }
        }
        WorkerMsg::Schedule {
            generation,
            result,
            background,
        } => {
            if !app.location.is_current(generation) {
                tracing::debug!(generation, "[Prayer] Dropping stale schedule");
                return;
            }
            match result {
                Ok(daily) => {
                    app.prayer.apply_schedule(daily, countdown_tx.clone());
                    app.status = None;
                }
                Err(e) if background => {
                    tracing::warn!(error = %e, "[Prayer] Background refresh failed; keeping previous schedule");
                    app.prayer.restart_countdown(countdown_tx.clone());
                    app.set_status(REFRESH_FAILED);
                }
                Err(e) => {
                    app.status = None;
                    alert(app, &e);
                }
            }
        }
        WorkerMsg::Bearing { generation, result } => {
            if !app.location.is_current(generation) {
                tracing::debug!(generation, "[Qibla] Dropping stale bearing");
                return;
            }
            match result {
                Ok(bearing) => app.qibla.apply_bearing(bearing),
                Err(e) => alert(app, &e),
            }
        }
        WorkerMsg::SurahList(result) => match result {
            Ok(list) => {
                tracing::info!(count = list.len(), "[Quran] Surah index loaded");
                app.quran.surahs = list;
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Quran] Surah index failed");
                app.set_status(e.user_message());
            }
        },
        WorkerMsg::Surah { number, result } => match result {
            Ok(text) => {
                if !app.quran.apply(text) {
                    tracing::debug!(number, "[Quran] Dropping surah no longer selected");
                }
            }
            Err(e) if number == app.quran.current => {
                app.quran.loading = false;
                alert(app, &e);
            }
            Err(e) => tracing::debug!(number, error = %e, "[Quran] Ignoring failure of old request"),
        },
        WorkerMsg::HadithBooks(result) => match result {
            Ok(books) => app.hadith.books = books,
            Err(e) => {
                tracing::warn!(error = %e, "[Hadith] Book list failed");
                app.set_status(e.user_message());
            }
        },
        WorkerMsg::HadithPage {
            book_id,
            range,
            result,
        } => match result {
            Ok(page) => {
                if !app.hadith.apply(page, &mut app.store) {
                    tracing::debug!(book = %book_id, %range, "[Hadith] Dropping stale page");
                }
            }
            Err(e) if book_id == app.hadith.book_id && range == app.hadith.range => {
                app.hadith.loading = false;
                alert(app, &e);
            }
            Err(e) => tracing::debug!(error = %e, "[Hadith] Ignoring failure of old request"),
        },
        WorkerMsg::Tracking(result) => match result {
            Ok(subscription) => {
                let task = workers.forward_headings(subscription);
                app.qibla.tracking_started(task);
            }
            Err(e) => {
                app.qibla.tracking_failed();
                alert(app, &e);
            }
        },
        WorkerMsg::Heading(heading) => app.qibla.apply_heading(heading),
        WorkerMsg::TrackingEnded => {
            tracing::info!("[Qibla] Orientation stream ended");
            app.qibla.end_tracking();
            app.set_status("توقف مستشعر الاتجاه.");
        }
    }
}

/// What: Apply a countdown event; an expiry reloads the schedule in the background.
pub fn handle_countdown_event(app: &mut AppState, event: CountdownEvent, workers: &Workers) {
    if app.prayer.handle_countdown(event) == CountdownUpdate::Expired {
        tracing::info!("[Prayer] Countdown expired; reloading schedule");
        refresh_schedule(app, workers, true);
    }
}

/// What: Periodic housekeeping on the UI tick.
///
/// Details:
/// - Advances the recitation when the player finished an ayah.
pub fn handle_tick(app: &mut AppState) {
    if app.player.poll_finished() {
        match app.quran.queue.finished() {
            Some(url) => play_url(app, &url),
            None => app.status = None,
        }
    }
}
