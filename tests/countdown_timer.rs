//! Integration tests for the cancellable countdown task.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::mpsc;

use noor::prayer::countdown::{Countdown, CountdownEvent, CountdownState, CountdownUpdate};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(11, 0, 0))
        .expect("valid instant")
}

fn later(secs: i64) -> NaiveDateTime {
    fixed_now() + chrono::TimeDelta::seconds(secs)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<CountdownEvent>) -> Vec<CountdownEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

#[tokio::test(start_paused = true)]
/// What: Restarting leaves exactly one ticking task.
///
/// Inputs:
/// - Two starts back to back; 3.5 s of paused time.
///
/// Output:
/// - Every event carries the second epoch; about one tick per second.
async fn restart_keeps_single_task() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut countdown = Countdown::default();
    let first = countdown.start(later(3600), later(3600), fixed_now, tx.clone());
    let second = countdown.start(later(3600), later(3600), fixed_now, tx);
    assert!(second > first);

    tokio::time::sleep(Duration::from_millis(3500)).await;
    let events = drain(&mut rx);
    assert!((3..=4).contains(&events.len()), "got {} events", events.len());
    for ev in events {
        assert!(matches!(ev, CountdownEvent::Tick { epoch, .. } if epoch == second));
        assert_eq!(countdown.handle(ev), CountdownUpdate::Ticked);
    }
    assert_eq!(countdown.display(), "01:00:00");
}

#[tokio::test(start_paused = true)]
/// What: A deadline already passed expires on the first tick, once.
///
/// Inputs:
/// - Target and refresh instant one second in the past.
///
/// Output:
/// - One tick then `Expired`; state `Expired`, display floored at zero.
async fn past_deadline_expires() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut countdown = Countdown::default();
    countdown.start(later(-1), later(-1), fixed_now, tx);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    let updates: Vec<CountdownUpdate> = drain(&mut rx)
        .into_iter()
        .map(|ev| countdown.handle(ev))
        .collect();
    assert_eq!(updates, vec![CountdownUpdate::Ticked, CountdownUpdate::Expired]);
    assert_eq!(countdown.state(), CountdownState::Expired);
    assert_eq!(countdown.display(), "00:00:00");
}

#[tokio::test(start_paused = true)]
/// What: Events from a cancelled epoch are ignored.
///
/// Inputs:
/// - A tick of epoch 1 applied after cancelling.
///
/// Output:
/// - `Ignored`; state `Idle`.
async fn cancelled_epoch_ignored() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut countdown = Countdown::default();
    let epoch = countdown.start(later(60), later(60), fixed_now, tx);
    countdown.cancel();
    let update = countdown.handle(CountdownEvent::Tick {
        epoch,
        remaining: chrono::TimeDelta::seconds(59),
    });
    assert_eq!(update, CountdownUpdate::Ignored);
    assert_eq!(countdown.state(), CountdownState::Idle);
}
