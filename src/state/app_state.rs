//! Central `AppState` container.

use tokio::sync::mpsc;

use crate::error::NoorError;
use crate::hadith::HadithState;
use crate::location::LocationResolver;
use crate::prayer::countdown::Clock;
use crate::prayer::engine::{PrayerEngine, local_timezone};
use crate::qibla::QiblaEngine;
use crate::quran::{AudioPlayer, QuranState};
use crate::state::modal::Modal;
use crate::state::types::Tab;
use crate::store::{KeyValueStore, keys};
use crate::theme::{Settings, Theme, ThemeMode};

/// Application state owned by the event loop.
///
/// Engines own their slice (coordinates, schedule, bearing); the UI reads this
/// structure and never writes engine data directly.
#[derive(Debug)]
pub struct AppState {
    /// Persistent key-value store.
    pub store: KeyValueStore,
    /// Parsed `settings.conf`.
    pub settings: Settings,
    /// IANA zone sent with timings requests.
    pub timezone: String,
    /// Coordinates and label.
    pub location: LocationResolver,
    /// Schedule, next prayer and countdown.
    pub prayer: PrayerEngine,
    /// Bearing, heading and orientation tracking.
    pub qibla: QiblaEngine,
    /// Quran tab.
    pub quran: QuranState,
    /// External recitation player.
    pub player: AudioPlayer,
    /// Hadith tab.
    pub hadith: HadithState,
    /// First visible adhkar row.
    pub adhkar_scroll: usize,
    /// Active tab.
    pub tab: Tab,
    /// Active modal dialog, if any.
    pub modal: Modal,
    /// Palette selection.
    pub theme_mode: ThemeMode,
    /// Transient status line (background failures, progress).
    pub status: Option<String>,
    /// A location request is in flight.
    pub locating: bool,
    /// Sender feeding the keyboard heading, when that sensor is active.
    pub manual_heading: Option<mpsc::UnboundedSender<f64>>,
    /// Set to leave the event loop.
    pub should_quit: bool,
}

impl AppState {
    /// What: Build the initial state from the store and settings.
    ///
    /// Inputs:
    /// - `store`: Opened key-value store (persisted surah, book, theme).
    /// - `settings`: Parsed settings.
    /// - `clock`: Wall clock for the countdown.
    ///
    /// Output:
    /// - State on the Prayer tab with no location committed yet.
    #[must_use]
    pub fn new(store: KeyValueStore, settings: Settings, clock: Clock) -> Self {
        let timezone = local_timezone(settings.timezone.as_deref());
        let theme_mode = store.load_or(keys::THEME, ThemeMode::Dark);
        let quran = QuranState::restore(&store, &settings.translation);
        let hadith = HadithState::restore(&store);
        let player = AudioPlayer::detect(&settings.audio_player);
        tracing::info!(timezone = %timezone, theme = ?theme_mode, "[State] Initialised");
        Self {
            store,
            settings,
            timezone,
            location: LocationResolver::default(),
            prayer: PrayerEngine::new(clock),
            qibla: QiblaEngine::default(),
            quran,
            player,
            hadith,
            adhkar_scroll: 0,
            tab: Tab::Prayer,
            modal: Modal::None,
            theme_mode,
            status: None,
            locating: false,
            manual_heading: None,
            should_quit: false,
        }
    }

    /// Palette for the current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme_mode.palette()
    }

    /// Switch dark/light and persist the choice.
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        if let Err(e) = self.store.save(keys::THEME, &self.theme_mode) {
            tracing::warn!(error = %e, "[State] Could not persist theme");
        }
    }

    /// Show `err` as a one-shot alert and log it.
    pub fn alert(&mut self, err: &NoorError) {
        tracing::warn!(error = %err, "[State] Alert");
        self.modal = Modal::Alert {
            message: err.user_message(),
        };
    }

    /// Replace the status line.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
    }
}
