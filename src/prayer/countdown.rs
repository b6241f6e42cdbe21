//! Cancellable one-second countdown toward the next prayer.
//!
//! States: `Idle → Counting → Expired`. Only one ticking task exists per [`Countdown`];
//! starting again aborts the previous task and bumps the epoch, so events still queued
//! from the old task are recognised and ignored.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::format_countdown;

/// Wall-clock source used by the ticking task.
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time without zone.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Lifecycle of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No target yet.
    Idle,
    /// Ticking once per second.
    Counting,
    /// Refresh deadline reached; waiting for a new schedule.
    Expired,
}

/// Message sent by the ticking task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Periodic update of the time left.
    Tick {
        /// Epoch of the task that produced it.
        epoch: u64,
        /// Signed time left until the displayed target.
        remaining: TimeDelta,
    },
    /// The refresh deadline passed; the task has stopped.
    Expired {
        /// Epoch of the task that produced it.
        epoch: u64,
    },
}

/// Outcome of feeding an event to [`Countdown::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownUpdate {
    /// Event came from a cancelled task or arrived out of state.
    Ignored,
    /// Display value changed.
    Ticked,
    /// Transitioned to `Expired`; the caller should reload the schedule.
    Expired,
}

/// What: Handle to the single ticking task.
///
/// Details:
/// - Dropping the handle aborts the task.
#[derive(Debug)]
pub struct Countdown {
    /// Current lifecycle state.
    state: CountdownState,
    /// Incremented on every start and cancel.
    epoch: u64,
    /// Running task, if any.
    task: Option<JoinHandle<()>>,
    /// Last known time left.
    remaining: TimeDelta,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            state: CountdownState::Idle,
            epoch: 0,
            task: None,
            remaining: TimeDelta::zero(),
        }
    }
}

impl Countdown {
    /// What: Start ticking toward `target`, replacing any running countdown.
    ///
    /// Inputs:
    /// - `target`: Instant whose remaining time is displayed.
    /// - `refresh_at`: Instant at which the countdown expires (usually `target`).
    /// - `clock`: Wall-clock source.
    /// - `tx`: Receiver side is drained by the controller.
    ///
    /// Output:
    /// - Epoch of the new task.
    ///
    /// Details:
    /// - Must run inside a Tokio runtime.
    /// - The first tick fires immediately, then once per second.
    pub fn start(
        &mut self,
        target: NaiveDateTime,
        refresh_at: NaiveDateTime,
        clock: Clock,
        tx: mpsc::UnboundedSender<CountdownEvent>,
    ) -> u64 {
        self.cancel();
        let epoch = self.epoch;
        self.state = CountdownState::Counting;
        self.remaining = target - clock();
        tracing::debug!(epoch, %target, %refresh_at, "[Countdown] Started");
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let now = clock();
                let remaining = target - now;
                if tx.send(CountdownEvent::Tick { epoch, remaining }).is_err() {
                    break;
                }
                if now >= refresh_at {
                    let _ = tx.send(CountdownEvent::Expired { epoch });
                    break;
                }
            }
        }));
        epoch
    }

    /// Abort the running task, if any, and return to `Idle`.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::trace!(epoch = self.epoch, "[Countdown] Cancelled previous task");
        }
        self.state = CountdownState::Idle;
    }

    /// What: Apply an event from the ticking task.
    ///
    /// Output:
    /// - What changed; events of superseded epochs are `Ignored`.
    pub fn handle(&mut self, event: CountdownEvent) -> CountdownUpdate {
        match event {
            CountdownEvent::Tick { epoch, remaining }
                if epoch == self.epoch && self.state == CountdownState::Counting =>
            {
                self.remaining = remaining;
                CountdownUpdate::Ticked
            }
            CountdownEvent::Expired { epoch }
                if epoch == self.epoch && self.state == CountdownState::Counting =>
            {
                self.task = None;
                self.state = CountdownState::Expired;
                tracing::debug!(epoch, "[Countdown] Expired");
                CountdownUpdate::Expired
            }
            _ => CountdownUpdate::Ignored,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    /// Epoch of the current (or last) task.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Signed time left as of the last tick.
    #[must_use]
    pub const fn remaining(&self) -> TimeDelta {
        self.remaining
    }

    /// `HH:MM:SS` of the time left, floored at zero.
    #[must_use]
    pub fn display(&self) -> String {
        format_countdown(self.remaining)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
