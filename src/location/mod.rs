//! Location resolution: device fix, place-name lookup, and human-readable labels.
//!
//! [`LocationResolver`] is the only writer of the current [`Coordinates`]. Commits are
//! persisted to the key-value store and stamped with a generation so that results of
//! fetches started for an older location can be told apart and dropped.

use serde::{Deserialize, Serialize};

use crate::error::{NoorError, Result};
use crate::net::Gateway;
use crate::sources::nominatim::{self, SearchHit};
use crate::store::{KeyValueStore, keys};

pub mod device;

use device::{PositionOptions, PositionProvider};

/// Latitude/longitude in decimal degrees. Serialized as `{"lat":..,"lng":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, degrees north.
    pub lat: f64,
    /// Longitude, degrees east.
    pub lng: f64,
}

/// Anchor used when nothing is stored yet: the Kaaba, Makkah.
pub const DEFAULT_ANCHOR: Coordinates = Coordinates {
    lat: 21.3891,
    lng: 39.8579,
};

/// What: Label shown when reverse geocoding fails.
///
/// Output:
/// - `"lat, lng"` with three decimals each, e.g. `"21.389, 39.858"`.
#[must_use]
pub fn fallback_label(coords: Coordinates) -> String {
    format!("{:.3}, {:.3}", coords.lat, coords.lng)
}

/// What: Obtain a one-shot position from the platform provider.
///
/// Inputs:
/// - `provider`: Position capability.
/// - `options`: Accuracy, timeout and cache-age bounds.
///
/// Output:
/// - Coordinates of the fix.
///
/// # Errors
/// - `NoorError::LocationUnavailable` when the capability is absent or refuses, the
///   lookup fails, or `options.timeout` elapses first.
pub async fn resolve_by_device(
    provider: &dyn PositionProvider,
    options: &PositionOptions,
) -> Result<Coordinates> {
    match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
        Ok(Ok(coords)) => {
            tracing::info!(lat = coords.lat, lng = coords.lng, "[Location] Device fix");
            Ok(coords)
        }
        Ok(Err(NoorError::LocationUnavailable(detail))) => {
            tracing::warn!(detail = %detail, "[Location] Device fix unavailable");
            Err(NoorError::LocationUnavailable(detail))
        }
        Ok(Err(other)) => {
            tracing::warn!(error = %other, "[Location] Device fix failed");
            Err(NoorError::LocationUnavailable(other.to_string()))
        }
        Err(_) => {
            tracing::warn!(timeout_ms = options.timeout.as_millis(), "[Location] Device fix timed out");
            Err(NoorError::LocationUnavailable(format!(
                "no fix within {}s",
                options.timeout.as_secs()
            )))
        }
    }
}

/// What: Pick the first geocoding match.
///
/// Inputs:
/// - `hits`: Service matches.
/// - `query`: Original query, for the error message.
///
/// # Errors
/// - `NoorError::PlaceNotFound` when there is no match.
/// - `NoorError::Network` when the match carries non-numeric coordinates.
pub fn first_match(hits: &[SearchHit], query: &str) -> Result<Coordinates> {
    let Some(hit) = hits.first() else {
        return Err(NoorError::PlaceNotFound(query.to_string()));
    };
    let lat = hit.lat.trim().parse::<f64>();
    let lng = hit.lon.trim().parse::<f64>();
    match (lat, lng) {
        (Ok(lat), Ok(lng)) => Ok(Coordinates { lat, lng }),
        _ => Err(NoorError::Network(format!(
            "geocoder returned invalid coordinates {:?},{:?}",
            hit.lat, hit.lon
        ))),
    }
}

/// What: Geocode a city and country.
///
/// # Errors
/// - `NoorError::PlaceNotFound` when nothing matches; `NoorError::Network` on transport failure.
pub async fn resolve_by_place_name(
    gateway: &Gateway,
    city: &str,
    country: &str,
) -> Result<Coordinates> {
    let query = format!("{city}, {country}");
    let hits = nominatim::search(gateway, &query).await?;
    let coords = first_match(&hits, &query)?;
    tracing::info!(query = %query, lat = coords.lat, lng = coords.lng, "[Location] Place resolved");
    Ok(coords)
}

/// What: Reverse-geocode `coords` into `"city, country"`.
///
/// # Errors
/// - `NoorError::Network` on any failure; callers fall back to [`fallback_label`].
pub async fn label_for(gateway: &Gateway, coords: Coordinates) -> Result<String> {
    let body = nominatim::reverse(gateway, coords).await?;
    Ok(nominatim::place_label(body.address.as_ref()))
}

/// What: Reverse-geocoded label, or the raw-coordinate fallback on failure.
pub async fn label_or_fallback(gateway: &Gateway, coords: Coordinates) -> String {
    match label_for(gateway, coords).await {
        Ok(label) => label,
        Err(e) => {
            tracing::debug!(error = %e, "[Location] Reverse geocoding failed, using coordinates");
            fallback_label(coords)
        }
    }
}

/// What: Owner of the current coordinates and their label.
///
/// Details:
/// - `request_seq` numbers resolution requests when they are *started*; a finished
///   resolution is committed only if no newer one was started meanwhile.
/// - `generation` numbers commits; dependent fetches (label, schedule, bearing) carry it
///   and are ignored once a newer commit exists.
#[derive(Debug, Default)]
pub struct LocationResolver {
    /// Last committed coordinates.
    current: Option<Coordinates>,
    /// Label of the current coordinates.
    label: String,
    /// Sequence number of the latest started resolution request.
    request_seq: u64,
    /// Generation of the latest commit.
    generation: u64,
}

impl LocationResolver {
    /// What: Read the persisted coordinates, or `fallback` when none are stored.
    #[must_use]
    pub fn stored_or(store: &KeyValueStore, fallback: Coordinates) -> Coordinates {
        store.load::<Coordinates>(keys::COORDS).unwrap_or(fallback)
    }

    /// Register a newly started resolution request and return its sequence number.
    pub const fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Whether `seq` is still the latest started request.
    #[must_use]
    pub const fn is_latest_request(&self, seq: u64) -> bool {
        seq == self.request_seq
    }

    /// Whether `generation` belongs to the latest commit.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// What: Make `coords` current and persist them.
    ///
    /// Inputs:
    /// - `coords`: Newly resolved coordinates.
    /// - `label`: Provisional label (e.g. the typed place), replaced once reverse
    ///   geocoding finishes; `None` shows the coordinate fallback meanwhile.
    /// - `store`: Persistent store receiving the `coords` key.
    ///
    /// Output:
    /// - Generation to tag the dependent fetches with.
    ///
    /// Details:
    /// - A storage failure is logged and does not undo the commit.
    pub fn commit(
        &mut self,
        coords: Coordinates,
        label: Option<String>,
        store: &mut KeyValueStore,
    ) -> u64 {
        self.generation += 1;
        self.current = Some(coords);
        self.label = label.unwrap_or_else(|| fallback_label(coords));
        if let Err(e) = store.save(keys::COORDS, &coords) {
            tracing::warn!(error = %e, "[Location] Could not persist coordinates");
        }
        tracing::info!(
            generation = self.generation,
            lat = coords.lat,
            lng = coords.lng,
            "[Location] Committed"
        );
        self.generation
    }

    /// Apply a reverse-geocoded label if `generation` is current; returns whether applied.
    pub fn apply_label(&mut self, generation: u64, label: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.label = label;
        true
    }

    /// Current coordinates, if any were committed.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.current
    }

    /// Label of the current coordinates.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Generation of the latest commit.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinates, LocationResolver, fallback_label, first_match};
    use crate::error::NoorError;
    use crate::sources::nominatim::SearchHit;
    use crate::store::{KeyValueStore, keys};

    #[test]
    /// What: Fallback label uses three decimals.
    ///
    /// Inputs:
    /// - Makkah anchor coordinates.
    ///
    /// Output:
    /// - `"21.389, 39.858"`.
    fn fallback_label_three_decimals() {
        assert_eq!(
            fallback_label(Coordinates {
                lat: 21.3891,
                lng: 39.8579
            }),
            "21.389, 39.858"
        );
    }

    #[test]
    /// What: Zero geocoding matches is `PlaceNotFound`; the first match wins otherwise.
    ///
    /// Inputs:
    /// - Empty hit list; two hits.
    ///
    /// Output:
    /// - Error naming the query; coordinates of the first hit.
    fn first_match_semantics() {
        assert_eq!(
            first_match(&[], "Atlantis, Nowhere"),
            Err(NoorError::PlaceNotFound("Atlantis, Nowhere".into()))
        );
        let hits = vec![
            SearchHit {
                lat: "30.0444".into(),
                lon: "31.2357".into(),
            },
            SearchHit {
                lat: "0".into(),
                lon: "0".into(),
            },
        ];
        let c = first_match(&hits, "Cairo, Egypt").expect("match");
        assert!((c.lat - 30.0444).abs() < 1e-9);
        assert!((c.lng - 31.2357).abs() < 1e-9);
    }

    #[test]
    /// What: Commits persist coordinates and supersede older generations.
    ///
    /// Inputs:
    /// - Two commits; a label for the first generation arriving late.
    ///
    /// Output:
    /// - Store holds the second coordinates; stale label ignored; fresh label applied.
    fn commit_persists_and_bumps_generation() {
        let mut store = KeyValueStore::in_memory();
        let mut resolver = LocationResolver::default();
        let first = resolver.commit(Coordinates { lat: 1.0, lng: 2.0 }, None, &mut store);
        let second = resolver.commit(
            Coordinates { lat: 3.0, lng: 4.0 },
            Some("Cairo, Egypt".into()),
            &mut store,
        );
        assert!(second > first);
        assert_eq!(resolver.label(), "Cairo, Egypt");
        assert!(!resolver.apply_label(first, "stale".into()));
        assert_eq!(resolver.label(), "Cairo, Egypt");
        assert!(resolver.apply_label(second, "القاهرة, مصر".into()));
        assert_eq!(resolver.label(), "القاهرة, مصر");
        assert_eq!(
            store.load::<Coordinates>(keys::COORDS),
            Some(Coordinates { lat: 3.0, lng: 4.0 })
        );
    }

    #[test]
    /// What: Only the most recently started request is accepted.
    ///
    /// Inputs:
    /// - Two requests started back to back.
    ///
    /// Output:
    /// - The first is no longer latest; the second is.
    fn newer_request_supersedes_older() {
        let mut resolver = LocationResolver::default();
        let a = resolver.begin_request();
        let b = resolver.begin_request();
        assert!(!resolver.is_latest_request(a));
        assert!(resolver.is_latest_request(b));
    }
}
