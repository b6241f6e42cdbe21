//! Prayer schedule model and the pure next-prayer computation.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::{NoorError, Result};
use crate::sources::aladhan::{DatePayload, Timings};

pub mod countdown;
pub mod engine;

/// The six daily boundaries, in daily order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerName {
    /// Dawn.
    Fajr,
    /// Sunrise (not a prayer, but a boundary shown in the list).
    Sunrise,
    /// Noon.
    Dhuhr,
    /// Afternoon.
    Asr,
    /// Sunset.
    Maghrib,
    /// Night.
    Isha,
}

impl PrayerName {
    /// All names in fixed daily order.
    pub const ALL: [Self; 6] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    /// Name as used by the timings service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Arabic display name.
    #[must_use]
    pub const fn arabic(self) -> &'static str {
        match self {
            Self::Fajr => "الفجر",
            Self::Sunrise => "الشروق",
            Self::Dhuhr => "الظهر",
            Self::Asr => "العصر",
            Self::Maghrib => "المغرب",
            Self::Isha => "العشاء",
        }
    }

    /// Position in [`PrayerName::ALL`].
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What: Time of day of each of the six boundaries.
///
/// Details:
/// - Always holds exactly six entries; it is replaced as a whole on each fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerSchedule {
    /// Times indexed by [`PrayerName`] order.
    times: [NaiveTime; 6],
}

impl PrayerSchedule {
    /// Build from times given in [`PrayerName::ALL`] order.
    #[must_use]
    pub const fn new(times: [NaiveTime; 6]) -> Self {
        Self { times }
    }

    /// What: Parse six `HH:MM` strings given in daily order.
    ///
    /// # Errors
    /// - `NoorError::ScheduleFetch` naming the first unparseable field.
    pub fn from_hhmm(values: [&str; 6]) -> Result<Self> {
        let mut times = [NaiveTime::default(); 6];
        for (slot, (name, raw)) in times.iter_mut().zip(PrayerName::ALL.iter().zip(values)) {
            *slot = parse_hhmm(raw).ok_or_else(|| {
                NoorError::ScheduleFetch(format!("malformed {name} time {raw:?}"))
            })?;
        }
        Ok(Self { times })
    }

    /// What: Convert the service's timings object.
    ///
    /// # Errors
    /// - `NoorError::ScheduleFetch` if any of the six fields is malformed.
    pub fn from_timings(t: &Timings) -> Result<Self> {
        Self::from_hhmm([
            t.fajr.as_str(),
            t.sunrise.as_str(),
            t.dhuhr.as_str(),
            t.asr.as_str(),
            t.maghrib.as_str(),
            t.isha.as_str(),
        ])
    }

    /// Time of day of `name`.
    #[must_use]
    pub const fn time(&self, name: PrayerName) -> NaiveTime {
        self.times[name.index()]
    }

    /// Entries in daily order.
    pub fn iter(&self) -> impl Iterator<Item = (PrayerName, NaiveTime)> + '_ {
        PrayerName::ALL.into_iter().zip(self.times.iter().copied())
    }
}

/// Parse the leading `HH:MM` of a timings value such as `"19:25 (+03)"`.
#[must_use]
pub fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    let token = raw.split_whitespace().next()?;
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

/// The upcoming boundary and the instant it occurs today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    /// Which boundary.
    pub name: PrayerName,
    /// Today's date combined with the boundary's time of day.
    pub target: NaiveDateTime,
}

impl NextPrayer {
    /// Signed time left until the target; negative once it has passed.
    #[must_use]
    pub fn remaining(&self, now: NaiveDateTime) -> TimeDelta {
        self.target - now
    }
}

/// What: Find the first boundary strictly after `now` on `now`'s date.
///
/// Inputs:
/// - `schedule`: Today's times.
/// - `now`: Local wall-clock time.
///
/// Output:
/// - The first boundary later than `now`; if none is (after Isha), today's Isha.
///
/// Details:
/// - There is no rollover to tomorrow's Fajr: past Isha the pointer stays on today's Isha
///   and the remaining time is zero or negative.
#[must_use]
pub fn compute_next_prayer(schedule: &PrayerSchedule, now: NaiveDateTime) -> NextPrayer {
    let today = now.date();
    schedule
        .iter()
        .map(|(name, t)| NextPrayer {
            name,
            target: today.and_time(t),
        })
        .find(|np| np.target > now)
        .unwrap_or(NextPrayer {
            name: PrayerName::Isha,
            target: today.and_time(schedule.time(PrayerName::Isha)),
        })
}

/// What: Render a remaining duration as `HH:MM:SS`.
///
/// Details:
/// - Negative durations render as `00:00:00`; partial seconds are dropped.
#[must_use]
pub fn format_countdown(remaining: TimeDelta) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// What: 12-hour Arabic display of a time of day, e.g. `"4:58 ص"`.
#[must_use]
pub fn format_time_12h(t: NaiveTime) -> String {
    let h = t.hour();
    let period = if h >= 12 { "م" } else { "ص" };
    let hh = ((h + 11) % 12) + 1;
    format!("{hh}:{:02} {period}", t.minute())
}

/// Display strings for the Hijri and Gregorian date of the loaded day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDay {
    /// Combined line: Gregorian weekday and date, then the Hijri date.
    pub summary: String,
    /// Hijri date with the `هـ` suffix.
    pub hijri: String,
    /// Gregorian date with the `م` suffix.
    pub gregorian: String,
}

impl CalendarDay {
    /// Build the display lines from the service's date object.
    #[must_use]
    pub fn from_payload(date: &DatePayload) -> Self {
        let h = &date.hijri;
        let g = &date.gregorian;
        let month = h.month.arabic_or_english();
        Self {
            summary: format!(
                "{} {} — {} {} {} {}",
                g.weekday.arabic_or_english(),
                g.date,
                h.weekday.arabic_or_english(),
                h.day,
                month,
                h.year
            ),
            hijri: format!("{} {} {} هـ", h.day, month, h.year),
            gregorian: format!("{} م", g.date),
        }
    }
}
