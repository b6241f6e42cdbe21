//! Integration tests for applying worker results to the application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use tokio::sync::mpsc;

use noor::app::handlers::{
    commit_location, handle_countdown_event, handle_worker_msg, request_place_location,
};
use noor::app::{WorkerMsg, Workers};
use noor::error::NoorError;
use noor::location::Coordinates;
use noor::location::device::DisabledPositionProvider;
use noor::prayer::countdown::{Clock, CountdownEvent, CountdownState, local_now};
use noor::prayer::engine::DailySchedule;
use noor::prayer::{CalendarDay, PrayerName, PrayerSchedule};
use noor::qibla::sensor::ManualSensor;
use noor::state::{AppState, Modal};
use noor::store::KeyValueStore;
use noor::theme::Settings;

const CAIRO: Coordinates = Coordinates {
    lat: 30.0444,
    lng: 31.2357,
};
const MADINAH: Coordinates = Coordinates {
    lat: 24.4672,
    lng: 39.6112,
};

/// Seconds after midnight on 2026-10-19 reported by [`movable_clock`].
static CLOCK_SECS: AtomicI64 = AtomicI64::new(0);

fn set_clock(h: i64, m: i64, s: i64) {
    CLOCK_SECS.store(h * 3600 + m * 60 + s, Ordering::SeqCst);
}

fn movable_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid instant")
        + chrono::TimeDelta::seconds(CLOCK_SECS.load(Ordering::SeqCst))
}

struct Harness {
    app: AppState,
    workers: Workers,
    worker_rx: mpsc::UnboundedReceiver<WorkerMsg>,
    countdown_tx: mpsc::UnboundedSender<CountdownEvent>,
    countdown_rx: mpsc::UnboundedReceiver<CountdownEvent>,
}

fn harness() -> Harness {
    harness_with_clock(local_now)
}

fn harness_with_clock(clock: Clock) -> Harness {
    let app = AppState::new(KeyValueStore::in_memory(), Settings::default(), clock);
    let (tx, worker_rx) = mpsc::unbounded_channel();
    let (sensor, _heading) = ManualSensor::new();
    let workers = Workers::new(
        None,
        Arc::new(DisabledPositionProvider),
        Arc::new(sensor),
        "UTC".into(),
        tx,
    );
    let (countdown_tx, countdown_rx) = mpsc::unbounded_channel();
    Harness {
        app,
        workers,
        worker_rx,
        countdown_tx,
        countdown_rx,
    }
}

fn daily() -> DailySchedule {
    DailySchedule {
        schedule: PrayerSchedule::from_hhmm(["04:58", "06:15", "12:10", "15:30", "18:05", "19:25"])
            .expect("valid"),
        calendar: CalendarDay::default(),
    }
}

#[tokio::test]
/// What: Results tagged with an older generation never alter state.
///
/// Inputs:
/// - Commit Cairo (gen 1), commit Madinah (gen 2); schedule, bearing and label for gen 1.
///
/// Output:
/// - No schedule, no bearing, label unchanged; gen 2 results then apply.
async fn stale_generation_dropped() {
    let mut h = harness();
    commit_location(&mut h.app, &h.workers, CAIRO, None);
    let old = h.app.location.generation();
    commit_location(&mut h.app, &h.workers, MADINAH, Some("Madinah".into()));
    let current = h.app.location.generation();

    for msg in [
        WorkerMsg::Schedule {
            generation: old,
            result: Ok(daily()),
            background: false,
        },
        WorkerMsg::Bearing {
            generation: old,
            result: Ok(136.0),
        },
        WorkerMsg::Label {
            generation: old,
            label: "Cairo, Egypt".into(),
        },
    ] {
        handle_worker_msg(&mut h.app, msg, &h.workers, &h.countdown_tx);
    }
    assert!(h.app.prayer.schedule().is_none());
    assert!(h.app.qibla.bearing().is_none());
    assert_eq!(h.app.location.label(), "Madinah");

    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Schedule {
            generation: current,
            result: Ok(daily()),
            background: false,
        },
        &h.workers,
        &h.countdown_tx,
    );
    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Bearing {
            generation: current,
            result: Ok(176.0),
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert!(h.app.prayer.schedule().is_some());
    assert!(h.app.prayer.next().is_some());
    assert_eq!(h.app.qibla.bearing(), Some(176.0));
    h.app.prayer.stop();
}

#[tokio::test]
/// What: A superseded resolution is dropped; the latest one commits.
///
/// Inputs:
/// - Two device requests; results for the first then the second.
///
/// Output:
/// - Only the second result's coordinates become current.
async fn superseded_resolution_dropped() {
    let mut h = harness();
    let first = h.app.location.begin_request();
    let second = h.app.location.begin_request();
    h.app.locating = true;
    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Resolved {
            seq: first,
            result: Ok((CAIRO, None)),
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert!(h.app.location.coordinates().is_none());
    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Resolved {
            seq: second,
            result: Ok((MADINAH, Some("Madinah".into()))),
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert_eq!(h.app.location.coordinates(), Some(MADINAH));
    assert!(!h.app.locating);
}

#[tokio::test(start_paused = true)]
/// What: Failures surface as alerts; a background refresh failure keeps the schedule
/// and the countdown moves on to the next boundary.
///
/// Inputs:
/// - Schedule applied at 06:14:59; clock moved past Sunrise so the countdown expires;
///   the background reload fails; clock moved to 07:00; foreground bearing failure.
///
/// Output:
/// - Schedule kept, status set, countdown `Counting` towards Dhuhr; alert modal for the bearing.
async fn failures_alert_or_keep_schedule() {
    set_clock(6, 14, 59);
    let mut h = harness_with_clock(movable_clock);
    commit_location(&mut h.app, &h.workers, CAIRO, None);
    let generation = h.app.location.generation();
    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Schedule {
            generation,
            result: Ok(daily()),
            background: false,
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert_eq!(h.app.prayer.next().map(|n| n.name), Some(PrayerName::Sunrise));

    set_clock(6, 15, 1);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    while let Ok(event) = h.countdown_rx.try_recv() {
        handle_countdown_event(&mut h.app, event, &h.workers);
    }
    assert_eq!(h.app.prayer.countdown_state(), CountdownState::Expired);

    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Schedule {
            generation,
            result: Err(NoorError::ScheduleFetch("timeout".into())),
            background: true,
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert!(h.app.prayer.schedule().is_some());
    assert!(h.app.status.is_some());
    assert!(h.app.modal.is_none());
    assert_eq!(h.app.prayer.countdown_state(), CountdownState::Counting);
    assert_eq!(h.app.prayer.next().map(|n| n.name), Some(PrayerName::Dhuhr));

    set_clock(7, 0, 0);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    while let Ok(event) = h.countdown_rx.try_recv() {
        handle_countdown_event(&mut h.app, event, &h.workers);
    }
    assert_eq!(h.app.prayer.countdown_state(), CountdownState::Counting);
    assert_eq!(h.app.prayer.countdown_display(), "05:10:00");

    handle_worker_msg(
        &mut h.app,
        WorkerMsg::Bearing {
            generation,
            result: Err(NoorError::BearingFetch("timeout".into())),
        },
        &h.workers,
        &h.countdown_tx,
    );
    assert!(matches!(h.app.modal, Modal::Alert { .. }));
    h.app.prayer.stop();
}

#[tokio::test]
/// What: A place request without network access fails instead of hanging.
///
/// Inputs:
/// - Headless workers (no gateway); request for `Cairo, Egypt`.
///
/// Output:
/// - A `Resolved` failure for the request; applying it clears the busy flag and alerts.
async fn place_request_without_network_fails() {
    let mut h = harness();
    request_place_location(&mut h.app, &h.workers, "Cairo", "Egypt");
    assert!(h.app.locating);
    let msg = h.worker_rx.try_recv().expect("resolution sent");
    assert!(matches!(
        msg,
        WorkerMsg::Resolved {
            result: Err(NoorError::Network(_)),
            ..
        }
    ));
    handle_worker_msg(&mut h.app, msg, &h.workers, &h.countdown_tx);
    assert!(!h.app.locating);
    assert!(h.app.status.is_none());
    assert!(matches!(h.app.modal, Modal::Alert { .. }));
    assert!(h.app.location.coordinates().is_none());
}
