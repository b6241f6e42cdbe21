//! Remote data gateway: JSON over HTTP GET against the external services.

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{NoorError, Result};

/// Base URLs of the external services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Prayer-time, calendar and qibla service.
    pub aladhan: String,
    /// Quran text and audio service.
    pub quran: String,
    /// Hadith collections service.
    pub hadith: String,
    /// Geocoding and reverse-geocoding service.
    pub nominatim: String,
    /// IP geolocation service backing the device position provider.
    pub ipgeo: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            aladhan: "https://api.aladhan.com/v1".to_string(),
            quran: "https://api.alquran.cloud/v1".to_string(),
            hadith: "https://api.hadith.gading.dev".to_string(),
            nominatim: "https://nominatim.openstreetmap.org".to_string(),
            ipgeo: "https://ipapi.co/json/".to_string(),
        }
    }
}

/// What: Shared HTTP client plus the service endpoints.
///
/// Details:
/// - Cheap to clone; clones share the connection pool.
/// - Every request carries an identifying `User-Agent` (required by the geocoder).
/// - No client-side timeout is enforced; calls fail only on transport errors or
///   non-success status.
#[derive(Clone, Debug)]
pub struct Gateway {
    /// Pooled client.
    client: reqwest::Client,
    /// Service base URLs.
    endpoints: Arc<Endpoints>,
}

impl Gateway {
    /// What: Build a gateway for the given endpoints.
    ///
    /// # Errors
    /// - `NoorError::Network` if the TLS backend cannot be initialised.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("NoorApp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NoorError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoints: Arc::new(endpoints),
        })
    }

    /// Configured service base URLs.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// What: Join a base URL, a path, and query parameters.
    ///
    /// Inputs:
    /// - `base`: Service base, with or without trailing slash.
    /// - `path`: Path below the base; may be empty.
    /// - `params`: Query pairs, percent-encoded by the URL builder.
    ///
    /// # Errors
    /// - `NoorError::Network` when the result is not a valid URL.
    pub fn url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let joined = if path.is_empty() {
            base.to_string()
        } else {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };
        let mut url =
            Url::parse(&joined).map_err(|e| NoorError::Network(format!("bad URL {joined}: {e}")))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// What: GET `url` and decode the JSON body as `T`.
    ///
    /// Output:
    /// - Decoded body on a 2xx response.
    ///
    /// # Errors
    /// - `NoorError::Network` on transport failure, non-success status, or an
    ///   undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "[Net] GET");
        let resp = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "[Net] Request failed");
            NoorError::Network(e.to_string())
        })?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "[Net] Non-success status");
            return Err(NoorError::Network(format!("HTTP {}", status.as_u16())));
        }
        resp.json::<T>().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "[Net] Undecodable body");
            NoorError::Network(format!("invalid response body: {e}"))
        })
    }
}
