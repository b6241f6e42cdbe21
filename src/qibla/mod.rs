//! Qibla Compass Engine: bearing, live heading, and the needle angle derived from both.

use tokio::task::JoinHandle;

use crate::error::{NoorError, Result};
use crate::location::Coordinates;
use crate::net::Gateway;
use crate::sources::aladhan;

pub mod sensor;

/// Map any finite angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// What: Rotation of the compass needle so it points at the qibla.
///
/// Inputs:
/// - `bearing`: Qibla bearing, degrees clockwise from north.
/// - `heading`: Device heading, degrees clockwise from north.
///
/// Output:
/// - `(bearing − heading) mod 360`, always in `[0, 360)`.
#[must_use]
pub fn compute_needle_angle(bearing: f64, heading: f64) -> f64 {
    normalize_degrees(bearing - heading)
}

/// What: Fetch the qibla bearing for `coords`.
///
/// # Errors
/// - `NoorError::BearingFetch` on any transport or decoding failure.
pub async fn load_bearing(gateway: &Gateway, coords: Coordinates) -> Result<f64> {
    let bearing = aladhan::fetch_qibla(gateway, coords)
        .await
        .map_err(|e| NoorError::BearingFetch(e.to_string()))?;
    tracing::info!(bearing, "[Qibla] Bearing loaded");
    Ok(bearing)
}

/// Lifecycle of the orientation subscription.
#[derive(Debug, Default)]
pub enum Tracking {
    /// Never started, or stopped.
    #[default]
    Inactive,
    /// Permission request or subscription in progress.
    Pending,
    /// Readings flowing; the handle belongs to the forwarding task.
    Active(JoinHandle<()>),
}

/// What: Owner of bearing, heading, and the orientation subscription.
///
/// Details:
/// - Readings are applied as they arrive; the last one wins with no smoothing.
#[derive(Debug, Default)]
pub struct QiblaEngine {
    /// Bearing of the current coordinates.
    bearing: Option<f64>,
    /// Last device heading.
    heading: Option<f64>,
    /// Subscription lifecycle.
    tracking: Tracking,
}

impl QiblaEngine {
    /// Replace the bearing after a successful fetch.
    pub fn apply_bearing(&mut self, bearing: f64) {
        self.bearing = Some(normalize_degrees(bearing));
    }

    /// Record a heading reading.
    pub fn apply_heading(&mut self, heading: f64) {
        self.heading = Some(normalize_degrees(heading));
    }

    /// Needle rotation; unknown bearing or heading counts as 0.
    #[must_use]
    pub fn needle_angle(&self) -> f64 {
        compute_needle_angle(self.bearing.unwrap_or(0.0), self.heading.unwrap_or(0.0))
    }

    /// Current bearing, if loaded.
    #[must_use]
    pub const fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    /// Last heading, if any reading arrived.
    #[must_use]
    pub const fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// What: Claim the right to start tracking.
    ///
    /// Output:
    /// - `true` if tracking was inactive and is now pending; `false` if a subscription is
    ///   already pending or active, in which case the caller must not start another.
    pub fn begin_tracking(&mut self) -> bool {
        if matches!(self.tracking, Tracking::Inactive) {
            self.tracking = Tracking::Pending;
            true
        } else {
            tracing::debug!("[Qibla] Orientation tracking already started");
            false
        }
    }

    /// Mark tracking active with the task forwarding readings.
    pub fn tracking_started(&mut self, task: JoinHandle<()>) {
        if let Tracking::Active(old) = std::mem::replace(&mut self.tracking, Tracking::Active(task)) {
            old.abort();
        }
        tracing::info!("[Qibla] Orientation tracking active");
    }

    /// Return to inactive after a failed start or an ended stream.
    pub fn tracking_failed(&mut self) {
        self.end_tracking();
    }

    /// Stop tracking and abort the forwarding task.
    pub fn end_tracking(&mut self) {
        if let Tracking::Active(task) = std::mem::take(&mut self.tracking) {
            task.abort();
        }
    }

    /// Whether a subscription is pending or active.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        !matches!(self.tracking, Tracking::Inactive)
    }
}

impl Drop for QiblaEngine {
    fn drop(&mut self) {
        self.end_tracking();
    }
}
