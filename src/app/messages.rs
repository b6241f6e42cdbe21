//! Messages sent from background workers to the event loop.

use crate::error::Result;
use crate::hadith::{HadithPage, HadithRange};
use crate::location::Coordinates;
use crate::prayer::engine::DailySchedule;
use crate::qibla::sensor::HeadingSubscription;
use crate::quran::SurahText;
use crate::sources::hadith::BookSummary;
use crate::sources::quran::SurahSummary;

/// What: Result of a background task, tagged so stale results can be recognised.
///
/// Details:
/// - `seq` values come from [`crate::location::LocationResolver::begin_request`].
/// - `generation` values come from [`crate::location::LocationResolver::commit`].
#[derive(Debug)]
pub enum WorkerMsg {
    /// A device or place-name resolution finished.
    Resolved {
        /// Request sequence number.
        seq: u64,
        /// Coordinates plus a provisional label (the typed place, if any).
        result: Result<(Coordinates, Option<String>)>,
    },
    /// Reverse-geocoded (or fallback) label for a committed location.
    Label {
        /// Location generation.
        generation: u64,
        /// Label text.
        label: String,
    },
    /// Daily schedule for a committed location.
    Schedule {
        /// Location generation.
        generation: u64,
        /// Parsed schedule or fetch error.
        result: Result<DailySchedule>,
        /// Triggered by countdown expiry rather than a user action.
        background: bool,
    },
    /// Qibla bearing for a committed location.
    Bearing {
        /// Location generation.
        generation: u64,
        /// Bearing in degrees or fetch error.
        result: Result<f64>,
    },
    /// Surah index.
    SurahList(Result<Vec<SurahSummary>>),
    /// Text and audio of one surah.
    Surah {
        /// Requested surah.
        number: u32,
        /// Loaded surah or fetch error.
        result: Result<SurahText>,
    },
    /// Hadith collections.
    HadithBooks(Result<Vec<BookSummary>>),
    /// One page of a collection.
    HadithPage {
        /// Requested collection.
        book_id: String,
        /// Requested range.
        range: HadithRange,
        /// Page or fetch error.
        result: Result<HadithPage>,
    },
    /// Orientation subscription outcome.
    Tracking(Result<HeadingSubscription>),
    /// Live heading reading.
    Heading(f64),
    /// The heading stream ended.
    TrackingEnded,
}
