//! Prayer Schedule Engine: fetches the day's schedule and drives the countdown.

use std::path::Path;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use tokio::sync::mpsc;

use super::countdown::{Clock, Countdown, CountdownEvent, CountdownState, CountdownUpdate};
use super::{CalendarDay, NextPrayer, PrayerSchedule, compute_next_prayer};
use crate::error::{NoorError, Result};
use crate::location::Coordinates;
use crate::net::Gateway;
use crate::sources::aladhan;

/// Grace period after midnight before an elapsed pointer triggers a refetch.
const MIDNIGHT_GRACE_SECS: i64 = 30;

/// A successfully fetched day: times plus calendar display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    /// The six boundaries.
    pub schedule: PrayerSchedule,
    /// Hijri/Gregorian display lines.
    pub calendar: CalendarDay,
}

/// What: Fetch the daily schedule and calendar for `coords`.
///
/// Inputs:
/// - `gateway`: HTTP gateway.
/// - `coords`: Location.
/// - `timezone`: IANA zone name (see [`local_timezone`]).
///
/// Output:
/// - Parsed [`DailySchedule`].
///
/// # Errors
/// - `NoorError::ScheduleFetch` on transport failure or a malformed response.
pub async fn load_schedule(
    gateway: &Gateway,
    coords: Coordinates,
    timezone: &str,
) -> Result<DailySchedule> {
    let payload = aladhan::fetch_timings(gateway, coords, timezone)
        .await
        .map_err(|e| match e {
            NoorError::ScheduleFetch(msg) => NoorError::ScheduleFetch(msg),
            other => NoorError::ScheduleFetch(other.to_string()),
        })?;
    let schedule = PrayerSchedule::from_timings(&payload.timings)?;
    let calendar = CalendarDay::from_payload(&payload.date);
    tracing::info!(
        lat = coords.lat,
        lng = coords.lng,
        timezone,
        "[Prayer] Schedule loaded"
    );
    Ok(DailySchedule { schedule, calendar })
}

/// What: Resolve the IANA time zone to request timings in.
///
/// Inputs:
/// - `setting`: Value of the `timezone` setting, if configured.
///
/// Output:
/// - The setting, else `TZ`, else the zone named by `/etc/localtime`, else `"UTC"`.
#[must_use]
pub fn local_timezone(setting: Option<&str>) -> String {
    if let Some(tz) = setting.map(str::trim).filter(|s| !s.is_empty()) {
        return tz.to_string();
    }
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim().trim_start_matches(':');
        if !tz.is_empty() {
            return tz.to_string();
        }
    }
    std::fs::read_link("/etc/localtime")
        .ok()
        .and_then(|target| zone_from_localtime(&target))
        .unwrap_or_else(|| "UTC".to_string())
}

/// Extract `Region/City` from a path like `/usr/share/zoneinfo/Region/City`.
fn zone_from_localtime(target: &Path) -> Option<String> {
    let s = target.to_str()?;
    let (_, zone) = s.split_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

/// What: When the countdown toward `next` should expire and trigger a reload.
///
/// Output:
/// - `next.target` while it is still ahead of `now`; otherwise (pointer already elapsed,
///   i.e. after Isha) the next local midnight plus a short grace period.
#[must_use]
pub fn refresh_deadline(next: &NextPrayer, now: NaiveDateTime) -> NaiveDateTime {
    if next.target > now {
        return next.target;
    }
    now.date()
        .succ_opt()
        .map_or(now, |d| d.and_time(NaiveTime::default()))
        + TimeDelta::seconds(MIDNIGHT_GRACE_SECS)
}

/// What: Owner of the schedule, the next-prayer pointer and the countdown handle.
///
/// Details:
/// - The schedule is replaced wholesale; a failed fetch never touches it.
#[derive(Debug)]
pub struct PrayerEngine {
    /// Current day's data, if any fetch succeeded.
    daily: Option<DailySchedule>,
    /// Pointer derived from `daily` and the clock.
    next: Option<NextPrayer>,
    /// Single countdown task handle.
    countdown: Countdown,
    /// Wall clock.
    clock: Clock,
}

impl PrayerEngine {
    /// Create an engine with no schedule using `clock` as wall time.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            daily: None,
            next: None,
            countdown: Countdown::default(),
            clock,
        }
    }

    /// What: Install a freshly fetched day and restart the countdown.
    ///
    /// Inputs:
    /// - `daily`: New schedule, replacing the previous one entirely.
    /// - `tx`: Countdown event channel.
    pub fn apply_schedule(&mut self, daily: DailySchedule, tx: mpsc::UnboundedSender<CountdownEvent>) {
        self.daily = Some(daily);
        self.restart_countdown(tx);
    }

    /// What: Recompute the pointer from the clock and (re)start the countdown.
    ///
    /// Details:
    /// - No-op without a schedule.
    /// - Any previous countdown task is cancelled first.
    pub fn restart_countdown(&mut self, tx: mpsc::UnboundedSender<CountdownEvent>) {
        let Some(daily) = &self.daily else {
            return;
        };
        let now = (self.clock)();
        let next = compute_next_prayer(&daily.schedule, now);
        let deadline = refresh_deadline(&next, now);
        tracing::debug!(prayer = %next.name, target = %next.target, "[Prayer] Next prayer");
        self.next = Some(next);
        self.countdown.start(next.target, deadline, self.clock, tx);
    }

    /// What: Feed a countdown event.
    ///
    /// Output:
    /// - `CountdownUpdate::Expired` when the caller must reload the schedule.
    pub fn handle_countdown(&mut self, event: CountdownEvent) -> CountdownUpdate {
        self.countdown.handle(event)
    }

    /// Stop ticking (e.g. on shutdown).
    pub fn stop(&mut self) {
        self.countdown.cancel();
    }

    /// Current day's schedule.
    #[must_use]
    pub fn schedule(&self) -> Option<&PrayerSchedule> {
        self.daily.as_ref().map(|d| &d.schedule)
    }

    /// Current day's calendar lines.
    #[must_use]
    pub fn calendar(&self) -> Option<&CalendarDay> {
        self.daily.as_ref().map(|d| &d.calendar)
    }

    /// Current next-prayer pointer.
    #[must_use]
    pub const fn next(&self) -> Option<&NextPrayer> {
        self.next.as_ref()
    }

    /// `HH:MM:SS` countdown, or `--:--:--` before the first schedule.
    #[must_use]
    pub fn countdown_display(&self) -> String {
        if self.daily.is_none() {
            return "--:--:--".to_string();
        }
        self.countdown.display()
    }

    /// Countdown lifecycle state.
    #[must_use]
    pub const fn countdown_state(&self) -> CountdownState {
        self.countdown.state()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::{local_timezone, refresh_deadline, zone_from_localtime};
    use crate::prayer::{NextPrayer, PrayerName};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid")
    }

    #[test]
    /// What: Deadline follows the target while ahead, else the next midnight.
    ///
    /// Inputs:
    /// - Target 19:25 with now 18:00, and with now 21:00.
    ///
    /// Output:
    /// - 19:25 today; 00:00:30 tomorrow.
    fn deadline_before_and_after_isha() {
        let next = NextPrayer {
            name: PrayerName::Isha,
            target: at(19, 25),
        };
        assert_eq!(refresh_deadline(&next, at(18, 0)), at(19, 25));
        let expected = NaiveDate::from_ymd_opt(2024, 3, 11)
            .and_then(|d| d.and_hms_opt(0, 0, 30))
            .expect("valid");
        assert_eq!(refresh_deadline(&next, at(21, 0)), expected);
    }

    #[test]
    /// What: Zone detection prefers the setting and parses zoneinfo links.
    ///
    /// Inputs:
    /// - Explicit setting; a zoneinfo symlink target; an unrelated path.
    ///
    /// Output:
    /// - Setting verbatim; `Africa/Cairo`; nothing.
    fn timezone_sources() {
        assert_eq!(local_timezone(Some(" Asia/Riyadh ")), "Asia/Riyadh");
        assert_eq!(
            zone_from_localtime(Path::new("/usr/share/zoneinfo/Africa/Cairo")).as_deref(),
            Some("Africa/Cairo")
        );
        assert_eq!(zone_from_localtime(Path::new("/etc/other")), None);
    }
}
