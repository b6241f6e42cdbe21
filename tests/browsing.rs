//! Integration tests for the Quran, hadith and adhkar browsing state.

use noor::content::adhkar;
use noor::hadith::{HadithPage, HadithRange, HadithState};
use noor::quran::{QuranState, filter_surahs, merge_editions};
use noor::sources::hadith::HadithPayload;
use noor::sources::quran::{AyahPayload, SurahSummary};
use noor::store::{KeyValueStore, keys};

fn surah(number: u32, name: &str, english: &str, meaning: &str, ayahs: u32) -> SurahSummary {
    SurahSummary {
        number,
        name: name.into(),
        english_name: english.into(),
        english_name_translation: meaning.into(),
        number_of_ayahs: ayahs,
    }
}

fn ayah(n: u32, text: &str, audio: Option<&str>) -> AyahPayload {
    AyahPayload {
        number_in_surah: n,
        text: text.into(),
        audio: audio.map(str::to_string),
    }
}

#[test]
/// What: Paging walks forward by ten and back never below the first page.
///
/// Inputs:
/// - Default range; next twice; previous three times.
///
/// Output:
/// - `21–30`, then back to `1–10`.
fn hadith_paging_arithmetic() {
    let mut state = HadithState::restore(&KeyValueStore::in_memory());
    assert_eq!(state.book_id, "bukhari");
    state.next_page();
    assert_eq!(state.next_page(), HadithRange { start: 21, end: 30 });
    state.previous_page();
    state.previous_page();
    assert_eq!(state.previous_page(), HadithRange::default());
    assert_eq!(HadithRange::default().to_string(), "1–10");
}

#[test]
/// What: A page is applied only when it matches the selection, and the book persists.
///
/// Inputs:
/// - Selection `muslim` 11–20; pages for `bukhari` 11–20 and `muslim` 11–20.
///
/// Output:
/// - First dropped; second applied and `hadithBook` stored.
fn hadith_page_apply_and_persist() {
    let mut store = KeyValueStore::in_memory();
    let mut state = HadithState {
        book_id: "muslim".into(),
        range: HadithRange { start: 11, end: 20 },
        loading: true,
        ..HadithState::default()
    };
    let page = |book: &str| HadithPage {
        book_id: book.into(),
        book_name: "HR. Muslim".into(),
        range: HadithRange { start: 11, end: 20 },
        hadiths: vec![HadithPayload {
            number: 11,
            arab: "حدثنا".into(),
        }],
    };
    assert!(!state.apply(page("bukhari"), &mut store));
    assert!(state.loading);
    assert!(state.apply(page("muslim"), &mut store));
    assert!(!state.loading);
    assert_eq!(store.load::<String>(keys::HADITH_BOOK).as_deref(), Some("muslim"));
    assert_eq!(HadithState::restore(&store).book_id, "muslim");
}

#[test]
/// What: Editions merge by position and a missing translation row is blank.
///
/// Inputs:
/// - Two Arabic ayahs, one translation row, two audio URLs.
///
/// Output:
/// - Two rows; second translation empty; queue URLs in order.
fn merge_surah_editions() {
    let text = merge_editions(
        112,
        vec![ayah(1, "قُلْ هُوَ اللَّهُ أَحَدٌ", None), ayah(2, "اللَّهُ الصَّمَدُ", None)],
        Some(vec![ayah(1, "Say, He is Allah, One", None)]),
        vec![ayah(1, "", Some("https://cdn/1.mp3")), ayah(2, "", Some("https://cdn/2.mp3"))],
    );
    assert_eq!(text.ayahs.len(), 2);
    assert_eq!(text.ayahs[0].translation.as_deref(), Some("Say, He is Allah, One"));
    assert_eq!(text.ayahs[1].translation.as_deref(), Some(""));
    assert_eq!(text.audio[1].as_deref(), Some("https://cdn/2.mp3"));

    let none = merge_editions(112, vec![ayah(1, "قُلْ", None)], None, vec![]);
    assert_eq!(none.ayahs[0].translation, None);
}

#[test]
/// What: The selected surah persists and stale texts are not installed.
///
/// Inputs:
/// - Select 2, apply text of 1, apply text of 2; out-of-range 0 and 115.
///
/// Output:
/// - Only surah 2 installed; `surah` stored as 2.
fn quran_selection_and_apply() {
    let mut store = KeyValueStore::in_memory();
    let mut state = QuranState::restore(&store, "en.sahih");
    assert_eq!(state.current, 1);
    assert!(state.select(2, &mut store));
    assert!(!state.select(0, &mut store));
    assert!(!state.select(115, &mut store));
    let old = merge_editions(1, vec![ayah(1, "بِسْمِ", None)], None, vec![ayah(1, "", Some("u1"))]);
    assert!(!state.apply(old));
    let new = merge_editions(2, vec![ayah(1, "الم", None)], None, vec![ayah(1, "", Some("u2"))]);
    assert!(state.apply(new));
    assert!(!state.loading);
    assert_eq!(state.queue.play_current().as_deref(), Some("u2"));
    assert_eq!(store.load::<u32>(keys::SURAH), Some(2));
    assert_eq!(QuranState::restore(&store, "none").current, 2);
}

#[test]
/// What: The picker matches numbers and transliterated names.
///
/// Inputs:
/// - Index of three surahs; queries `"kahf"`, `"18"`, `""`.
///
/// Output:
/// - Al-Kahf first for both queries; all rows in order for the empty query.
fn surah_picker_filter() {
    let surahs = vec![
        surah(1, "سُورَةُ ٱلْفَاتِحَةِ", "Al-Faatiha", "The Opening", 7),
        surah(18, "سُورَةُ ٱلْكَهْفِ", "Al-Kahf", "The Cave", 110),
        surah(36, "سُورَةُ يسٓ", "Yaseen", "Yaseen", 83),
    ];
    assert_eq!(filter_surahs(&surahs, "kahf").first(), Some(&1));
    assert_eq!(filter_surahs(&surahs, "18").first(), Some(&1));
    assert_eq!(filter_surahs(&surahs, ""), vec![0, 1, 2]);
    assert!(filter_surahs(&surahs, "zzzz").is_empty());
}

#[test]
/// What: Adhkar ship three non-empty groups.
fn adhkar_groups() {
    let groups = adhkar::groups();
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| !g.items.is_empty()));
    assert_eq!(adhkar::total_items(), groups.iter().map(|g| g.items.len()).sum::<usize>());
}
