//! Prayer-time, calendar and qibla endpoints.

use serde::Deserialize;

use super::Envelope;
use crate::error::Result;
use crate::location::Coordinates;
use crate::net::Gateway;

/// Calculation method id: University of Islamic Sciences, Karachi.
///
/// Must stay `"2"` so schedules match ones cached or shared by other clients.
pub const CALCULATION_METHOD: &str = "2";

/// Daily timings plus calendar data.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingsPayload {
    /// Prayer times as `HH:MM` strings.
    pub timings: Timings,
    /// Hijri and Gregorian date for the day.
    pub date: DatePayload,
}

/// The six prayer-time fields used by the app (the service returns more).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timings {
    /// Dawn prayer.
    pub fajr: String,
    /// Sunrise.
    pub sunrise: String,
    /// Noon prayer.
    pub dhuhr: String,
    /// Afternoon prayer.
    pub asr: String,
    /// Sunset prayer.
    pub maghrib: String,
    /// Night prayer.
    pub isha: String,
}

/// Hijri and Gregorian dates.
#[derive(Debug, Clone, Deserialize)]
pub struct DatePayload {
    /// Islamic lunar date.
    pub hijri: HijriDate,
    /// Civil date.
    pub gregorian: GregorianDate,
}

/// English/Arabic label pair; either side may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Label {
    /// English label.
    pub en: Option<String>,
    /// Arabic label.
    pub ar: Option<String>,
}

impl Label {
    /// Arabic label, else English, else empty.
    #[must_use]
    pub fn arabic_or_english(&self) -> &str {
        self.ar
            .as_deref()
            .or(self.en.as_deref())
            .unwrap_or_default()
    }
}

/// Hijri date fields.
#[derive(Debug, Clone, Deserialize)]
pub struct HijriDate {
    /// Day of month.
    pub day: String,
    /// Weekday names.
    #[serde(default)]
    pub weekday: Label,
    /// Month names.
    #[serde(default)]
    pub month: Label,
    /// Hijri year.
    pub year: String,
}

/// Gregorian date fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GregorianDate {
    /// `DD-MM-YYYY`.
    pub date: String,
    /// Weekday names (the service sends English only).
    #[serde(default)]
    pub weekday: Label,
}

/// Qibla response body.
#[derive(Debug, Clone, Deserialize)]
struct QiblaPayload {
    /// Degrees clockwise from true north.
    direction: f64,
}

/// What: Fetch today's timings and calendar for `coords`.
///
/// Inputs:
/// - `gateway`: HTTP gateway.
/// - `coords`: Location.
/// - `timezone`: IANA zone the times should be expressed in.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_timings(
    gateway: &Gateway,
    coords: Coordinates,
    timezone: &str,
) -> Result<TimingsPayload> {
    let url = Gateway::url(
        &gateway.endpoints().aladhan,
        "timings",
        &[
            ("latitude", coords.lat.to_string()),
            ("longitude", coords.lng.to_string()),
            ("method", CALCULATION_METHOD.to_string()),
            ("timezonestring", timezone.to_string()),
        ],
    )?;
    let body: Envelope<TimingsPayload> = gateway.get_json(url).await?;
    Ok(body.data)
}

/// What: Fetch the qibla bearing for `coords`.
///
/// Output:
/// - Degrees clockwise from true north.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_qibla(gateway: &Gateway, coords: Coordinates) -> Result<f64> {
    let url = Gateway::url(
        &gateway.endpoints().aladhan,
        &format!("qibla/{}/{}", coords.lat, coords.lng),
        &[],
    )?;
    let body: Envelope<QiblaPayload> = gateway.get_json(url).await?;
    Ok(body.data.direction)
}

#[cfg(test)]
mod tests {
    use super::{Envelope, TimingsPayload};

    #[test]
    /// What: A trimmed real response decodes, including a Gregorian weekday without Arabic.
    ///
    /// Inputs:
    /// - JSON with extra timings (`Imsak`, `Midnight`) and zone-suffixed values.
    ///
    /// Output:
    /// - Six fields decoded; Arabic falls back to English for the Gregorian weekday.
    fn decodes_timings_payload() {
        let raw = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "timings": {
                    "Fajr": "04:58", "Sunrise": "06:15", "Dhuhr": "12:10",
                    "Asr": "15:30", "Sunset": "18:05", "Maghrib": "18:05",
                    "Isha": "19:25 (+03)", "Imsak": "04:48", "Midnight": "00:10"
                },
                "date": {
                    "readable": "19 Oct 2026",
                    "hijri": {
                        "date": "08-05-1448", "day": "08",
                        "weekday": {"en": "Al Athnayn", "ar": "الاثنين"},
                        "month": {"number": 5, "en": "Jumādá al-ūlá", "ar": "جُمادى الأولى"},
                        "year": "1448"
                    },
                    "gregorian": {
                        "date": "19-10-2026", "day": "19",
                        "weekday": {"en": "Monday"},
                        "month": {"number": 10, "en": "October"},
                        "year": "2026"
                    }
                }
            }
        }"#;
        let body: Envelope<TimingsPayload> = serde_json::from_str(raw).expect("decodes");
        assert_eq!(body.data.timings.fajr, "04:58");
        assert_eq!(body.data.timings.isha, "19:25 (+03)");
        assert_eq!(body.data.date.gregorian.weekday.arabic_or_english(), "Monday");
        assert_eq!(body.data.date.hijri.month.arabic_or_english(), "جُمادى الأولى");
    }
}
