//! Quran text, translation and recitation endpoints.

use serde::Deserialize;

use super::Envelope;
use crate::error::Result;
use crate::net::Gateway;

/// Edition holding the Uthmani script text.
pub const ARABIC_EDITION: &str = "quran-uthmani";
/// Edition holding per-ayah recitation audio.
pub const AUDIO_EDITION: &str = "ar.alafasy";

/// One entry of the surah index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahSummary {
    /// 1-based surah number.
    pub number: u32,
    /// Arabic name.
    pub name: String,
    /// Transliterated name.
    pub english_name: String,
    /// English meaning of the name.
    #[serde(default)]
    pub english_name_translation: String,
    /// Ayah count.
    pub number_of_ayahs: u32,
}

/// One ayah of an edition; `text` or `audio` depending on the edition type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyahPayload {
    /// Position within the surah, 1-based.
    pub number_in_surah: u32,
    /// Text (text editions).
    #[serde(default)]
    pub text: String,
    /// Recitation URL (audio editions).
    #[serde(default)]
    pub audio: Option<String>,
}

/// A surah rendered in one edition.
#[derive(Debug, Clone, Deserialize)]
struct EditionPayload {
    /// Ayahs in order.
    ayahs: Vec<AyahPayload>,
}

/// What: Fetch the surah index.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_surah_list(gateway: &Gateway) -> Result<Vec<SurahSummary>> {
    let url = Gateway::url(&gateway.endpoints().quran, "surah", &[])?;
    let body: Envelope<Vec<SurahSummary>> = gateway.get_json(url).await?;
    Ok(body.data)
}

/// What: Fetch the ayahs of surah `number` in `edition`.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_edition(
    gateway: &Gateway,
    number: u32,
    edition: &str,
) -> Result<Vec<AyahPayload>> {
    let url = Gateway::url(
        &gateway.endpoints().quran,
        &format!("surah/{number}/{edition}"),
        &[],
    )?;
    let body: Envelope<EditionPayload> = gateway.get_json(url).await?;
    Ok(body.data.ayahs)
}
