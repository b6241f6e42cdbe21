//! Device orientation capability.
//!
//! A reading may carry a magnetometer-corrected compass heading or only an absolute
//! `alpha` angle; [`heading_from_reading`] folds both into one clockwise-from-north value.
//! A subscription is a [`futures::Stream`] of headings with an explicit `unsubscribe`.

use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::normalize_degrees;
use crate::error::{NoorError, Result};

/// Poll interval once a line source reaches end of file.
const FOLLOW_INTERVAL: Duration = Duration::from_millis(250);

/// One raw orientation sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct OrientationReading {
    /// Compass heading, clockwise from north.
    #[serde(default, rename = "compassHeading", alias = "webkitCompassHeading")]
    pub compass_heading: Option<f64>,
    /// Rotation about the vertical axis, counter-clockwise.
    #[serde(default)]
    pub alpha: Option<f64>,
    /// Whether `alpha` is relative to true north.
    #[serde(default)]
    pub absolute: bool,
}

/// What: Normalize a reading into a heading in `[0, 360)`.
///
/// Output:
/// - The compass heading if present; else `360 − alpha` for absolute readings;
///   `None` when the reading carries neither.
#[must_use]
pub fn heading_from_reading(reading: &OrientationReading) -> Option<f64> {
    if let Some(h) = reading.compass_heading.filter(|h| h.is_finite()) {
        return Some(normalize_degrees(h));
    }
    match reading.alpha {
        Some(alpha) if reading.absolute && alpha.is_finite() => Some(normalize_degrees(360.0 - alpha)),
        _ => None,
    }
}

/// What: Live sequence of headings.
///
/// Details:
/// - Not restartable; once it ends a new subscription is needed.
/// - Dropping or calling [`HeadingSubscription::unsubscribe`] stops the producer.
#[derive(Debug)]
pub struct HeadingSubscription {
    /// Headings from the producer.
    rx: mpsc::UnboundedReceiver<f64>,
    /// Task feeding `rx`, if the sensor runs one.
    producer: Option<JoinHandle<()>>,
}

impl HeadingSubscription {
    /// Wrap a receiver and the task that feeds it.
    #[must_use]
    pub const fn new(rx: mpsc::UnboundedReceiver<f64>, producer: Option<JoinHandle<()>>) -> Self {
        Self { rx, producer }
    }

    /// Stop the producer and close the stream.
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    /// Abort the producer task and close the receiver.
    fn stop(&mut self) {
        if let Some(task) = self.producer.take() {
            task.abort();
        }
        self.rx.close();
    }
}

impl Stream for HeadingSubscription {
    type Item = f64;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<f64>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for HeadingSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Source of orientation readings.
#[async_trait]
pub trait OrientationSensor: Send + Sync {
    /// Whether [`OrientationSensor::request_permission`] must succeed before subscribing.
    fn requires_permission(&self) -> bool;

    /// What: Ask for access to the sensor.
    ///
    /// # Errors
    /// - `NoorError::PermissionDenied` when access is refused.
    async fn request_permission(&self) -> Result<()>;

    /// What: Start receiving headings.
    ///
    /// # Errors
    /// - `NoorError::PermissionDenied` when the sensor cannot be opened.
    async fn subscribe(&self) -> Result<HeadingSubscription>;
}

/// What: Request permission when required, then subscribe.
///
/// # Errors
/// - `NoorError::PermissionDenied` if permission is refused or the subscription fails.
pub async fn begin_orientation_tracking(
    sensor: &dyn OrientationSensor,
) -> Result<HeadingSubscription> {
    if sensor.requires_permission() {
        sensor.request_permission().await?;
    }
    sensor.subscribe().await
}

/// What: Orientation readings as JSON lines from a file or FIFO.
///
/// Details:
/// - Lines that fail to parse or carry no heading are skipped.
/// - At end of file the source is polled again, so appended readings are picked up.
#[derive(Debug, Clone)]
pub struct LineSensor {
    /// Path of the line source.
    path: PathBuf,
}

impl LineSensor {
    /// Read readings from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrientationSensor for LineSensor {
    fn requires_permission(&self) -> bool {
        true
    }

    async fn request_permission(&self) -> Result<()> {
        match tokio::fs::File::open(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "[Qibla] Orientation source not readable");
                Err(NoorError::PermissionDenied(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        }
    }

    async fn subscribe(&self) -> Result<HeadingSubscription> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| NoorError::PermissionDenied(format!("{}: {e}", self.path.display())))?;
        let (tx, rx) = mpsc::unbounded_channel();
        let path = self.path.clone();
        let producer = tokio::spawn(async move {
            let mut lines = BufReader::new(file).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Ok(reading) = serde_json::from_str::<OrientationReading>(line.trim())
                        else {
                            tracing::trace!(line = %line, "[Qibla] Skipping unparseable reading");
                            continue;
                        };
                        if let Some(heading) = heading_from_reading(&reading)
                            && tx.send(heading).is_err()
                        {
                            break;
                        }
                    }
                    Ok(None) => {
                        if tx.is_closed() {
                            break;
                        }
                        tokio::time::sleep(FOLLOW_INTERVAL).await;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "[Qibla] Orientation source failed");
                        break;
                    }
                }
            }
        });
        tracing::info!(path = %self.path.display(), "[Qibla] Subscribed to orientation source");
        Ok(HeadingSubscription::new(rx, Some(producer)))
    }
}

/// What: Heading driven from the keyboard.
///
/// Details:
/// - Needs no permission and may be subscribed once; headings are pushed through the
///   sender returned by [`ManualSensor::new`].
#[derive(Debug)]
pub struct ManualSensor {
    /// Receiver handed out on the first subscription.
    rx: Mutex<Option<mpsc::UnboundedReceiver<f64>>>,
}

impl ManualSensor {
    /// Create the sensor and the sender used to push headings.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedSender<f64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                rx: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl OrientationSensor for ManualSensor {
    fn requires_permission(&self) -> bool {
        false
    }

    async fn request_permission(&self) -> Result<()> {
        Ok(())
    }

    async fn subscribe(&self) -> Result<HeadingSubscription> {
        let rx = self
            .rx
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .ok_or_else(|| NoorError::PermissionDenied("manual heading already in use".to_string()))?;
        Ok(HeadingSubscription::new(rx, None))
    }
}
