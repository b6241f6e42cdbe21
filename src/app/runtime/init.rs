use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::handlers::{commit_location, request_place_location};
use crate::app::messages::WorkerMsg;
use crate::app::workers::Workers;
use crate::location::device::{
    CachedPositionProvider, DisabledPositionProvider, IpPositionProvider, PositionProvider,
};
use crate::location::{Coordinates, LocationResolver};
use crate::net::Gateway;
use crate::qibla::sensor::{LineSensor, ManualSensor, OrientationSensor};
use crate::state::AppState;
use crate::theme::GeolocationMode;

/// What: Startup overrides from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    /// Start at these coordinates instead of the stored ones.
    pub coordinates: Option<Coordinates>,
    /// Geocode this city and country after startup.
    pub place: Option<(String, String)>,
    /// Read orientation from this JSON-lines source.
    pub orientation_source: Option<PathBuf>,
}

/// What: Build the worker handles for `app`.
///
/// Inputs:
/// - `app`: State; receives the keyboard heading sender when no source is configured.
/// - `headless`: Disables network workers and device position.
/// - `launch`: Command-line overrides.
/// - `tx`: Worker result channel.
///
/// # Errors
/// - Returns an error when the HTTP client cannot be built.
pub fn build_workers(
    app: &mut AppState,
    headless: bool,
    launch: &LaunchOptions,
    tx: mpsc::UnboundedSender<WorkerMsg>,
) -> super::Result<Workers> {
    let gateway = if headless {
        None
    } else {
        Some(Gateway::new(app.settings.endpoints.clone())?)
    };
    let provider: Arc<dyn PositionProvider> = match (&gateway, app.settings.geolocation) {
        (Some(gw), GeolocationMode::Ip) => Arc::new(CachedPositionProvider::new(
            IpPositionProvider::new(gw.clone()),
        )),
        _ => Arc::new(DisabledPositionProvider),
    };
    let source = launch
        .orientation_source
        .clone()
        .or_else(|| app.settings.orientation_source.clone());
    let sensor: Arc<dyn OrientationSensor> = if let Some(path) = source {
        tracing::info!(path = %path.display(), "[Init] Orientation from line source");
        Arc::new(LineSensor::new(path))
    } else {
        let (sensor, heading_tx) = ManualSensor::new();
        app.manual_heading = Some(heading_tx);
        Arc::new(sensor)
    };
    Ok(Workers::new(
        gateway,
        provider,
        sensor,
        app.timezone.clone(),
        tx,
    ))
}

/// What: Kick off the startup loads.
///
/// Details:
/// - Commits the launch coordinates, else the stored ones, else the default anchor;
///   a launch place is geocoded afterwards and supersedes it.
/// - Loads the surah index and selected surah, and the hadith books and first page.
pub fn start_initial_loads(app: &mut AppState, workers: &Workers, launch: &LaunchOptions) {
    let coords = launch.coordinates.unwrap_or_else(|| {
        LocationResolver::stored_or(&app.store, app.settings.default_anchor)
    });
    tracing::info!(lat = coords.lat, lng = coords.lng, "[Init] Starting location");
    commit_location(app, workers, coords, None);
    if let Some((city, country)) = &launch.place {
        request_place_location(app, workers, city, country);
    }

    workers.load_surah_list();
    app.quran.loading = true;
    workers.load_surah(app.quran.current, app.quran.translation.clone());

    workers.load_hadith_books();
    app.hadith.loading = true;
    workers.load_hadith_page(app.hadith.book_id.clone(), app.hadith.range);
}
