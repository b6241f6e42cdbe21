//! Hadith browsing: collection list and fixed-size numeric pages.

use crate::error::Result;
use crate::net::Gateway;
use crate::sources::hadith::{self, BookSummary, HadithPayload};
use crate::store::{KeyValueStore, keys};

/// Hadiths per page.
pub const PAGE_SIZE: u32 = 10;

/// Collection opened when nothing is stored.
pub const DEFAULT_BOOK: &str = "bukhari";

/// Text shown for a range with no hadiths.
pub const EMPTY_PAGE: &str = "لا توجد بيانات في هذا المدى.";

/// Inclusive numeric range within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HadithRange {
    /// First number.
    pub start: u32,
    /// Last number.
    pub end: u32,
}

impl Default for HadithRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: PAGE_SIZE,
        }
    }
}

impl HadithRange {
    /// Page before this one, never below `1..=10`.
    #[must_use]
    pub fn previous(self) -> Self {
        Self {
            start: self.start.saturating_sub(PAGE_SIZE).max(1),
            end: self.end.saturating_sub(PAGE_SIZE).max(PAGE_SIZE),
        }
    }

    /// Page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            start: self.start + PAGE_SIZE,
            end: self.end + PAGE_SIZE,
        }
    }
}

impl std::fmt::Display for HadithRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

/// A loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithPage {
    /// Collection id the page belongs to.
    pub book_id: String,
    /// Collection display name.
    pub book_name: String,
    /// Range requested.
    pub range: HadithRange,
    /// Hadiths in the range (possibly empty).
    pub hadiths: Vec<HadithPayload>,
}

/// What: Fetch `range` of collection `book_id`.
///
/// # Errors
/// - `NoorError::Network` on transport, status, or decoding failure.
pub async fn load_page(gateway: &Gateway, book_id: &str, range: HadithRange) -> Result<HadithPage> {
    let page = hadith::fetch_range(gateway, book_id, range.start, range.end).await?;
    tracing::info!(book = book_id, range = %range, count = page.hadiths.len(), "[Hadith] Page loaded");
    Ok(HadithPage {
        book_id: book_id.to_string(),
        book_name: page.name,
        range,
        hadiths: page.hadiths,
    })
}

/// What: Everything the Hadith tab shows and controls.
#[derive(Debug, Clone, Default)]
pub struct HadithState {
    /// Available collections.
    pub books: Vec<BookSummary>,
    /// Selected collection id.
    pub book_id: String,
    /// Range shown (or requested).
    pub range: HadithRange,
    /// Last loaded page.
    pub page: Option<HadithPage>,
    /// First visible row.
    pub scroll: usize,
    /// A load is in flight.
    pub loading: bool,
}

impl HadithState {
    /// Restore the persisted collection (default `bukhari`) at the first page.
    #[must_use]
    pub fn restore(store: &KeyValueStore) -> Self {
        Self {
            book_id: store.load_or(keys::HADITH_BOOK, DEFAULT_BOOK.to_string()),
            ..Self::default()
        }
    }

    /// Move to the previous page; returns the range to load.
    pub fn previous_page(&mut self) -> HadithRange {
        self.range = self.range.previous();
        self.loading = true;
        self.range
    }

    /// Move to the next page; returns the range to load.
    pub fn next_page(&mut self) -> HadithRange {
        self.range = self.range.next();
        self.loading = true;
        self.range
    }

    /// What: Switch to the collection after the current one in `books`.
    ///
    /// Output:
    /// - The new book id, with the range reset to the first page; `None` without books.
    pub fn cycle_book(&mut self) -> Option<String> {
        if self.books.is_empty() {
            return None;
        }
        let pos = self.books.iter().position(|b| b.id == self.book_id);
        let next = pos.map_or(0, |i| (i + 1) % self.books.len());
        self.book_id.clone_from(&self.books[next].id);
        self.range = HadithRange::default();
        self.loading = true;
        Some(self.book_id.clone())
    }

    /// What: Install a loaded page if it matches the current selection.
    ///
    /// Details:
    /// - The collection id is persisted after each successful load.
    pub fn apply(&mut self, page: HadithPage, store: &mut KeyValueStore) -> bool {
        if page.book_id != self.book_id || page.range != self.range {
            return false;
        }
        if let Err(e) = store.save(keys::HADITH_BOOK, &page.book_id) {
            tracing::warn!(error = %e, "[Hadith] Could not persist book");
        }
        self.page = Some(page);
        self.scroll = 0;
        self.loading = false;
        true
    }
}
