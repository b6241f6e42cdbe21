//! One-shot `--print` mode: resolve the location, fetch, print, exit.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use noor::app::LaunchOptions;
use noor::error::Result;
use noor::location::{self, Coordinates, LocationResolver};
use noor::net::Gateway;
use noor::prayer::engine::{DailySchedule, load_schedule, local_timezone};
use noor::prayer::{compute_next_prayer, format_countdown, format_time_12h};
use noor::qibla::load_bearing;
use noor::store::KeyValueStore;
use noor::theme::{settings, store_path};

/// What: Resolve the location, fetch the schedule and bearing, and print them.
///
/// Output:
/// - Exits the process: 0 on success, 1 when the location or schedule could not be
///   obtained.
///
/// Details:
/// - The qibla line is omitted when only the bearing fetch fails.
pub async fn handle_print(launch: &LaunchOptions) -> ! {
    tracing::info!("Print mode requested from CLI");
    match build_report(launch).await {
        Ok(report) => {
            print!("{report}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            tracing::error!(error = %e, "Print mode failed");
            std::process::exit(1);
        }
    }
}

/// Fetch everything the report needs.
async fn build_report(launch: &LaunchOptions) -> Result<String> {
    let settings = settings();
    let store = KeyValueStore::open(store_path());
    let gateway = Gateway::new(settings.endpoints.clone())?;
    let coords: Coordinates = match (&launch.coordinates, &launch.place) {
        (Some(c), _) => *c,
        (None, Some((city, country))) => {
            location::resolve_by_place_name(&gateway, city, country).await?
        }
        (None, None) => LocationResolver::stored_or(&store, settings.default_anchor),
    };
    let timezone = local_timezone(settings.timezone.as_deref());
    let label = location::label_or_fallback(&gateway, coords).await;
    let daily = load_schedule(&gateway, coords, &timezone).await?;
    let bearing = match load_bearing(&gateway, coords).await {
        Ok(b) => Some(b),
        Err(e) => {
            tracing::warn!(error = %e, "[Qibla] Bearing unavailable for report");
            None
        }
    };
    Ok(format_report(&label, &daily, bearing, noor::prayer::countdown::local_now()))
}

/// What: Render the plain-text report.
///
/// Output:
/// - Label, date, six times, next prayer with time left, and the bearing if known.
pub fn format_report(
    label: &str,
    daily: &DailySchedule,
    bearing: Option<f64>,
    now: NaiveDateTime,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{label}");
    let _ = writeln!(out, "{}", daily.calendar.summary);
    for (name, t) in daily.schedule.iter() {
        let _ = writeln!(out, "  {:<8} {}", name.arabic(), format_time_12h(t));
    }
    let next = compute_next_prayer(&daily.schedule, now);
    let _ = writeln!(
        out,
        "الصلاة القادمة: {} ({})",
        next.name.arabic(),
        format_countdown(next.remaining(now))
    );
    if let Some(b) = bearing {
        let _ = writeln!(out, "اتجاه القبلة: {b:.1}°");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use noor::prayer::engine::DailySchedule;
    use noor::prayer::{CalendarDay, PrayerSchedule};

    use super::format_report;

    #[test]
    /// What: The report lists all six times, the next prayer and the bearing.
    ///
    /// Inputs:
    /// - Schedule with Dhuhr at 12:10; now 11:10:00; bearing 136.5.
    ///
    /// Output:
    /// - Dhuhr named as next with `01:00:00` left; bearing line present.
    fn report_contents() {
        let daily = DailySchedule {
            schedule: PrayerSchedule::from_hhmm(["04:58", "06:15", "12:10", "15:30", "18:05", "19:25"])
                .expect("valid"),
            calendar: CalendarDay {
                summary: "Monday 19-10-2026".into(),
                ..CalendarDay::default()
            },
        };
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(11, 10, 0))
            .expect("valid");
        let report = format_report("Makkah", &daily, Some(136.5), now);
        assert_eq!(report.lines().count(), 10);
        assert!(report.contains("الظهر (01:00:00)"));
        assert!(report.contains("136.5°"));
        assert!(report.contains("12:10 م"));
    }
}
