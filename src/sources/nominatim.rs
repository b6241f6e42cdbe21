//! Geocoding and reverse-geocoding against a Nominatim-compatible service.

use serde::Deserialize;

use crate::error::Result;
use crate::location::Coordinates;
use crate::net::Gateway;

/// Placeholder city used when the reverse geocoder returns no locality.
pub const UNKNOWN_PLACE: &str = "موقعك";

/// Address fields returned by reverse geocoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    /// City name.
    pub city: Option<String>,
    /// Town name (smaller localities).
    pub town: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// Reverse geocoding body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReverseResponse {
    /// Address, absent for points in the ocean.
    pub address: Option<Address>,
}

/// One forward-geocoding match; coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Latitude in decimal degrees.
    pub lat: String,
    /// Longitude in decimal degrees.
    pub lon: String,
}

/// What: Render an address as `"city, country"`.
///
/// Details:
/// - Locality preference: city, town, state, then [`UNKNOWN_PLACE`].
/// - Country defaults to empty, leaving a trailing `", "`.
#[must_use]
pub fn place_label(address: Option<&Address>) -> String {
    let city = address
        .and_then(|a| {
            [&a.city, &a.town, &a.state]
                .into_iter()
                .filter_map(|f| f.as_deref())
                .find(|s| !s.is_empty())
        })
        .unwrap_or(UNKNOWN_PLACE);
    let country = address
        .and_then(|a| a.country.as_deref())
        .unwrap_or_default();
    format!("{city}, {country}")
}

/// What: Reverse-geocode `coords` into an address.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn reverse(gateway: &Gateway, coords: Coordinates) -> Result<ReverseResponse> {
    let url = Gateway::url(
        &gateway.endpoints().nominatim,
        "reverse",
        &[
            ("format", "json".to_string()),
            ("lat", coords.lat.to_string()),
            ("lon", coords.lng.to_string()),
            ("zoom", "10".to_string()),
            ("accept-language", "ar".to_string()),
        ],
    )?;
    gateway.get_json(url).await
}

/// What: Forward-geocode a free-text place description.
///
/// Output:
/// - At most one match (the service is asked for `limit=1`).
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn search(gateway: &Gateway, query: &str) -> Result<Vec<SearchHit>> {
    let url = Gateway::url(
        &gateway.endpoints().nominatim,
        "search",
        &[
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", "ar".to_string()),
        ],
    )?;
    gateway.get_json(url).await
}

#[cfg(test)]
mod tests {
    use super::{Address, ReverseResponse, UNKNOWN_PLACE, place_label};

    #[test]
    /// What: Locality preference order and missing-field defaults.
    ///
    /// Inputs:
    /// - Addresses with town only, state only, nothing, and no address at all.
    ///
    /// Output:
    /// - Town/state chosen in order; placeholder when none; empty country kept.
    fn label_prefers_city_then_town_then_state() {
        let town = Address {
            town: Some("بلدة".into()),
            state: Some("ولاية".into()),
            country: Some("مصر".into()),
            ..Address::default()
        };
        assert_eq!(place_label(Some(&town)), "بلدة, مصر");
        let state = Address {
            state: Some("ولاية".into()),
            ..Address::default()
        };
        assert_eq!(place_label(Some(&state)), "ولاية, ");
        assert_eq!(place_label(None), format!("{UNKNOWN_PLACE}, "));

        let body: ReverseResponse =
            serde_json::from_str(r#"{"address":{"city":"مكة","country":"السعودية"}}"#)
                .expect("decodes");
        assert_eq!(place_label(body.address.as_ref()), "مكة, السعودية");
    }
}
