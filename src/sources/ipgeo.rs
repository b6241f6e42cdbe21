//! IP geolocation lookup used as the desktop stand-in for a device position fix.

use serde::Deserialize;

use crate::error::{NoorError, Result};
use crate::location::Coordinates;
use crate::net::Gateway;

/// Response of an ipapi-style service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IpFix {
    /// Latitude, absent on lookup failure.
    pub latitude: Option<f64>,
    /// Longitude, absent on lookup failure.
    pub longitude: Option<f64>,
    /// Set by the service when the lookup failed.
    pub error: bool,
    /// Failure reason.
    pub reason: Option<String>,
}

impl IpFix {
    /// What: Convert into coordinates.
    ///
    /// # Errors
    /// - `NoorError::LocationUnavailable` when the service flagged an error or omitted a field.
    pub fn into_coordinates(self) -> Result<Coordinates> {
        if self.error {
            return Err(NoorError::LocationUnavailable(
                self.reason.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Ok(Coordinates { lat, lng }),
            _ => Err(NoorError::LocationUnavailable(
                "position missing from response".to_string(),
            )),
        }
    }
}

/// What: Look up the approximate position of this machine.
///
/// # Errors
/// - `NoorError::Network` on transport failure; `LocationUnavailable` on an empty answer.
pub async fn lookup(gateway: &Gateway) -> Result<Coordinates> {
    let url = Gateway::url(&gateway.endpoints().ipgeo, "", &[])?;
    let fix: IpFix = gateway.get_json(url).await?;
    fix.into_coordinates()
}
