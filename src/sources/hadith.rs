//! Hadith collection endpoints.

use serde::Deserialize;

use super::Envelope;
use crate::error::Result;
use crate::net::Gateway;

/// A hadith collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSummary {
    /// Identifier used in URLs (`bukhari`, `muslim`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of hadiths available.
    #[serde(default)]
    pub available: u32,
}

/// One hadith.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HadithPayload {
    /// Number within the collection.
    pub number: u32,
    /// Arabic text.
    pub arab: String,
}

/// A numeric range of a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPage {
    /// Collection display name.
    pub name: String,
    /// Hadiths in the range; absent when the range is past the end.
    #[serde(default)]
    pub hadiths: Vec<HadithPayload>,
}

/// What: Fetch the list of collections.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_books(gateway: &Gateway) -> Result<Vec<BookSummary>> {
    let url = Gateway::url(&gateway.endpoints().hadith, "books", &[])?;
    let body: Envelope<Vec<BookSummary>> = gateway.get_json(url).await?;
    Ok(body.data)
}

/// What: Fetch hadiths `start..=end` of collection `book_id`.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn fetch_range(gateway: &Gateway, book_id: &str, start: u32, end: u32) -> Result<BookPage> {
    let url = Gateway::url(
        &gateway.endpoints().hadith,
        &format!("books/{book_id}"),
        &[("range", format!("{start}-{end}"))],
    )?;
    let body: Envelope<BookPage> = gateway.get_json(url).await?;
    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use super::{BookPage, Envelope};

    #[test]
    /// What: A page past the end of a collection decodes with no hadiths.
    ///
    /// Inputs:
    /// - Body without a `hadiths` field.
    ///
    /// Output:
    /// - Empty list, name preserved.
    fn page_without_hadiths_is_empty() {
        let body: Envelope<BookPage> = serde_json::from_str(
            r#"{"code":200,"data":{"name":"HR. Bukhari","id":"bukhari","available":6638}}"#,
        )
        .expect("decodes");
        assert!(body.data.hadiths.is_empty());
        assert_eq!(body.data.name, "HR. Bukhari");
    }
}
