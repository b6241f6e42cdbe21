//! Background workers: every network call runs in its own task and reports back
//! through [`WorkerMsg`].

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::messages::WorkerMsg;
use crate::error::NoorError;
use crate::hadith::{self, HadithRange};
use crate::location::device::{PositionOptions, PositionProvider};
use crate::location::{self, Coordinates};
use crate::net::Gateway;
use crate::prayer::engine::load_schedule;
use crate::qibla::load_bearing;
use crate::qibla::sensor::{HeadingSubscription, OrientationSensor, begin_orientation_tracking};
use crate::quran;
use crate::sources;

/// What: Handles shared by all workers.
///
/// Details:
/// - With no gateway (headless mode) every spawn is a no-op.
#[derive(Clone)]
pub struct Workers {
    /// HTTP gateway; `None` disables network workers.
    gateway: Option<Gateway>,
    /// Device position capability.
    provider: Arc<dyn PositionProvider>,
    /// Orientation capability.
    sensor: Arc<dyn OrientationSensor>,
    /// IANA zone for timings requests.
    timezone: String,
    /// Result channel.
    tx: mpsc::UnboundedSender<WorkerMsg>,
}

impl std::fmt::Debug for Workers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workers")
            .field("network", &self.gateway.is_some())
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl Workers {
    /// What: Bundle the worker handles.
    ///
    /// Inputs:
    /// - `gateway`: `None` to run without network access.
    #[must_use]
    pub fn new(
        gateway: Option<Gateway>,
        provider: Arc<dyn PositionProvider>,
        sensor: Arc<dyn OrientationSensor>,
        timezone: String,
        tx: mpsc::UnboundedSender<WorkerMsg>,
    ) -> Self {
        Self {
            gateway,
            provider,
            sensor,
            timezone,
            tx,
        }
    }

    /// Clone of the gateway and sender when network workers are enabled.
    fn net(&self) -> Option<(Gateway, mpsc::UnboundedSender<WorkerMsg>)> {
        self.gateway.clone().map(|g| (g, self.tx.clone()))
    }

    /// Ask the device for a one-shot position fix.
    pub fn resolve_device(&self, seq: u64) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = location::resolve_by_device(provider.as_ref(), &PositionOptions::default())
                .await
                .map(|c| (c, None));
            let _ = tx.send(WorkerMsg::Resolved { seq, result });
        });
    }

    /// What: Geocode a typed place.
    ///
    /// Details:
    /// - Without network access the request fails at once so the caller stops waiting.
    pub fn resolve_place(&self, seq: u64, city: String, country: String) {
        let Some((gateway, tx)) = self.net() else {
            let _ = self.tx.send(WorkerMsg::Resolved {
                seq,
                result: Err(NoorError::Network("network access disabled".to_string())),
            });
            return;
        };
        tokio::spawn(async move {
            let result = location::resolve_by_place_name(&gateway, &city, &country)
                .await
                .map(|c| (c, Some(format!("{city}, {country}"))));
            let _ = tx.send(WorkerMsg::Resolved { seq, result });
        });
    }

    /// What: Run the dependent fetches for a committed location.
    ///
    /// Details:
    /// - Sequential: label, schedule, bearing. A failing step does not stop the next.
    pub fn location_pipeline(&self, generation: u64, coords: Coordinates) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        let timezone = self.timezone.clone();
        tokio::spawn(async move {
            let label = location::label_or_fallback(&gateway, coords).await;
            let _ = tx.send(WorkerMsg::Label { generation, label });
            let result = load_schedule(&gateway, coords, &timezone).await;
            let _ = tx.send(WorkerMsg::Schedule {
                generation,
                result,
                background: false,
            });
            let result = load_bearing(&gateway, coords).await;
            let _ = tx.send(WorkerMsg::Bearing { generation, result });
        });
    }

    /// Refetch the schedule after the countdown expired.
    pub fn reload_schedule(&self, generation: u64, coords: Coordinates, background: bool) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        let timezone = self.timezone.clone();
        tokio::spawn(async move {
            let result = load_schedule(&gateway, coords, &timezone).await;
            let _ = tx.send(WorkerMsg::Schedule {
                generation,
                result,
                background,
            });
        });
    }

    /// Fetch the surah index.
    pub fn load_surah_list(&self) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        tokio::spawn(async move {
            let result = sources::quran::fetch_surah_list(&gateway).await;
            let _ = tx.send(WorkerMsg::SurahList(result));
        });
    }

    /// Fetch one surah with `translation` (or `"none"`).
    pub fn load_surah(&self, number: u32, translation: String) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        tokio::spawn(async move {
            let result = quran::load_surah(&gateway, number, &translation).await;
            let _ = tx.send(WorkerMsg::Surah { number, result });
        });
    }

    /// Fetch the hadith collections.
    pub fn load_hadith_books(&self) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        tokio::spawn(async move {
            let result = sources::hadith::fetch_books(&gateway).await;
            let _ = tx.send(WorkerMsg::HadithBooks(result));
        });
    }

    /// Fetch `range` of collection `book_id`.
    pub fn load_hadith_page(&self, book_id: String, range: HadithRange) {
        let Some((gateway, tx)) = self.net() else {
            return;
        };
        tokio::spawn(async move {
            let result = hadith::load_page(&gateway, &book_id, range).await;
            let _ = tx.send(WorkerMsg::HadithPage {
                book_id,
                range,
                result,
            });
        });
    }

    /// Request orientation permission and subscribe.
    pub fn start_tracking(&self) {
        let sensor = Arc::clone(&self.sensor);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = begin_orientation_tracking(sensor.as_ref()).await;
            let _ = tx.send(WorkerMsg::Tracking(result));
        });
    }

    /// What: Forward headings from `subscription` until it ends.
    ///
    /// Output:
    /// - Handle of the forwarding task; aborting it drops the subscription.
    #[must_use]
    pub fn forward_headings(&self, mut subscription: HeadingSubscription) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            while let Some(heading) = subscription.next().await {
                if tx.send(WorkerMsg::Heading(heading)).is_err() {
                    subscription.unsubscribe();
                    return;
                }
            }
            let _ = tx.send(WorkerMsg::TrackingEnded);
        })
    }
}
