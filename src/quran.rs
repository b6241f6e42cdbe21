//! Quran reading and recitation: surah index, text with optional translation, and an
//! ayah-by-ayah audio queue played through an external program.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use fuzzy_matcher::skim::SkimMatcherV2;

use crate::error::{NoorError, Result};
use crate::net::Gateway;
use crate::sources::quran::{self, AyahPayload, SurahSummary};
use crate::store::{KeyValueStore, keys};
use crate::util::fuzzy_match_rank_with_matcher;

/// Translation editions cycled with the translation key; `none` hides the translation.
pub const TRANSLATIONS: [&str; 3] = ["en.sahih", "en.pickthall", "none"];

/// Edition following `current` in [`TRANSLATIONS`]; unknown values restart the cycle.
#[must_use]
pub fn next_translation(current: &str) -> &'static str {
    let idx = TRANSLATIONS.iter().position(|t| *t == current);
    idx.map_or(TRANSLATIONS[0], |i| TRANSLATIONS[(i + 1) % TRANSLATIONS.len()])
}

/// One rendered ayah.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ayah {
    /// Number within the surah.
    pub number: u32,
    /// Arabic text.
    pub text: String,
    /// Translation text, when a translation edition is selected.
    pub translation: Option<String>,
}

/// A loaded surah with the recitation URL of each ayah.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurahText {
    /// Surah number.
    pub number: u32,
    /// Ayahs in order.
    pub ayahs: Vec<Ayah>,
    /// Recitation URL per ayah (same order as `ayahs`).
    pub audio: Vec<Option<String>>,
}

/// What: Merge the three editions of a surah into display rows.
///
/// Details:
/// - Translation rows are matched by position; a missing one yields an empty string.
#[must_use]
pub fn merge_editions(
    number: u32,
    arabic: Vec<AyahPayload>,
    translation: Option<Vec<AyahPayload>>,
    audio: Vec<AyahPayload>,
) -> SurahText {
    let ayahs = arabic
        .into_iter()
        .enumerate()
        .map(|(i, a)| Ayah {
            number: a.number_in_surah,
            text: a.text,
            translation: translation
                .as_ref()
                .map(|tr| tr.get(i).map(|t| t.text.clone()).unwrap_or_default()),
        })
        .collect();
    SurahText {
        number,
        ayahs,
        audio: audio.into_iter().map(|a| a.audio).collect(),
    }
}

/// What: Fetch surah `number` in Arabic, the selected translation, and the recitation.
///
/// Inputs:
/// - `translation`: Edition id, or `"none"`.
///
/// # Errors
/// - `NoorError::Network` if any of the requests fails.
pub async fn load_surah(gateway: &Gateway, number: u32, translation: &str) -> Result<SurahText> {
    let want_translation = translation != "none";
    let (arabic, tr, audio) = tokio::try_join!(
        quran::fetch_edition(gateway, number, quran::ARABIC_EDITION),
        async {
            if want_translation {
                quran::fetch_edition(gateway, number, translation).await.map(Some)
            } else {
                Ok(None)
            }
        },
        quran::fetch_edition(gateway, number, quran::AUDIO_EDITION),
    )?;
    tracing::info!(surah = number, ayahs = arabic.len(), translation, "[Quran] Surah loaded");
    Ok(merge_editions(number, arabic, tr, audio))
}

/// Playback status of the audio queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    /// Nothing loaded into the player.
    #[default]
    Stopped,
    /// Current ayah playing.
    Playing,
    /// Current ayah paused.
    Paused,
}

/// What: Ayah-by-ayah recitation cursor.
///
/// Details:
/// - Navigation clamps to the first and last ayah.
/// - Methods that should start audio return the URL to hand to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioQueue {
    /// Recitation URL per ayah.
    urls: Vec<Option<String>>,
    /// Current ayah index.
    index: usize,
    /// Player status.
    playback: Playback,
}

impl AudioQueue {
    /// Load a new surah's URLs; the cursor returns to the first ayah.
    pub fn reset(&mut self, urls: Vec<Option<String>>) {
        self.urls = urls;
        self.index = 0;
        self.playback = Playback::Stopped;
    }

    /// URL of the current ayah, marking it playing.
    pub fn play_current(&mut self) -> Option<String> {
        let url = self.urls.get(self.index).cloned().flatten()?;
        self.playback = Playback::Playing;
        Some(url)
    }

    /// Jump to ayah `index` (clamped) and play it.
    pub fn select(&mut self, index: usize) -> Option<String> {
        self.index = index.min(self.urls.len().saturating_sub(1));
        self.play_current()
    }

    /// Advance one ayah (clamped at the last) and play.
    pub fn next(&mut self) -> Option<String> {
        self.select(self.index + 1)
    }

    /// Go back one ayah (clamped at the first) and play.
    pub fn previous(&mut self) -> Option<String> {
        self.select(self.index.saturating_sub(1))
    }

    /// Restart from the first ayah.
    pub fn play_surah(&mut self) -> Option<String> {
        self.select(0)
    }

    /// What: Play/pause toggle.
    ///
    /// Output:
    /// - `Some(url)` when playback must (re)start; `None` when it should pause.
    pub fn toggle(&mut self) -> Option<String> {
        match self.playback {
            Playback::Stopped | Playback::Paused => self.play_current(),
            Playback::Playing => {
                self.playback = Playback::Paused;
                None
            }
        }
    }

    /// What: The current ayah finished playing.
    ///
    /// Output:
    /// - URL of the following ayah, or `None` after the last one (playback stops).
    pub fn finished(&mut self) -> Option<String> {
        if self.index + 1 < self.urls.len() {
            self.index += 1;
            self.play_current()
        } else {
            self.playback = Playback::Stopped;
            None
        }
    }

    /// Current ayah index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Player status.
    #[must_use]
    pub const fn playback(&self) -> Playback {
        self.playback
    }

    /// Number of ayahs queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether no surah is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// What: External program that plays a URL to completion.
///
/// Details:
/// - Pausing stops the process; resuming restarts the current ayah.
#[derive(Debug, Default)]
pub struct AudioPlayer {
    /// Resolved executable, if found on `PATH`.
    program: Option<PathBuf>,
    /// Running player process.
    child: Option<Child>,
}

impl AudioPlayer {
    /// Resolve `configured` (e.g. `mpv`) on `PATH`.
    #[must_use]
    pub fn detect(configured: &str) -> Self {
        let program = which::which(configured.trim()).ok();
        match &program {
            Some(p) => tracing::info!(player = %p.display(), "[Quran] Audio player found"),
            None => tracing::warn!(player = configured, "[Quran] Audio player not on PATH"),
        }
        Self {
            program,
            child: None,
        }
    }

    /// Whether a player executable was found.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.program.is_some()
    }

    /// What: Start playing `url`, stopping anything already playing.
    ///
    /// Output:
    /// - `Ok(false)` when no player is available (caller shows the URL instead).
    ///
    /// # Errors
    /// - `NoorError::Playback` when the player cannot be spawned.
    pub fn play(&mut self, url: &str) -> Result<bool> {
        self.stop();
        let Some(program) = &self.program else {
            return Ok(false);
        };
        let child = Command::new(program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| NoorError::Playback(format!("{}: {e}", program.display())))?;
        tracing::debug!(url, pid = child.id(), "[Quran] Playing");
        self.child = Some(child);
        Ok(true)
    }

    /// Stop the running player, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// Whether the running player exited on its own since the last call.
    pub fn poll_finished(&mut self) -> bool {
        let done = self
            .child
            .as_mut()
            .is_some_and(|c| matches!(c.try_wait(), Ok(Some(_))));
        if done {
            self.child = None;
        }
        done
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What: Rank surahs against a picker query.
///
/// Output:
/// - Indices into `surahs`, best match first; all indices in order for an empty query.
#[must_use]
pub fn filter_surahs(surahs: &[SurahSummary], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..surahs.len()).collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut ranked: Vec<(usize, i64)> = surahs
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let hay = format!("{} {} {} {}", s.number, s.name, s.english_name, s.english_name_translation);
            fuzzy_match_rank_with_matcher(&hay, query.trim(), &matcher).map(|score| (i, score))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().map(|(i, _)| i).collect()
}

/// What: Everything the Quran tab shows and controls.
#[derive(Debug, Default)]
pub struct QuranState {
    /// Surah index.
    pub surahs: Vec<SurahSummary>,
    /// Selected surah number (1-based).
    pub current: u32,
    /// Loaded text of `current`.
    pub text: Option<SurahText>,
    /// Selected translation edition.
    pub translation: String,
    /// Recitation cursor.
    pub queue: AudioQueue,
    /// First visible ayah row.
    pub scroll: usize,
    /// A load is in flight.
    pub loading: bool,
}

impl QuranState {
    /// Restore the persisted surah (default 1) with `translation` selected.
    #[must_use]
    pub fn restore(store: &KeyValueStore, translation: &str) -> Self {
        let current = store.load_or::<u32>(keys::SURAH, 1).clamp(1, 114);
        Self {
            current,
            translation: translation.to_string(),
            ..Self::default()
        }
    }

    /// What: Select surah `number` and persist it.
    ///
    /// Output:
    /// - `false` when `number` is out of range and nothing changed.
    pub fn select(&mut self, number: u32, store: &mut KeyValueStore) -> bool {
        let max = u32::try_from(self.surahs.len()).ok().filter(|n| *n > 0).unwrap_or(114);
        if number == 0 || number > max {
            return false;
        }
        self.current = number;
        self.loading = true;
        if let Err(e) = store.save(keys::SURAH, &number) {
            tracing::warn!(error = %e, "[Quran] Could not persist surah");
        }
        true
    }

    /// Install a loaded surah if it is still the selected one.
    pub fn apply(&mut self, text: SurahText) -> bool {
        if text.number != self.current {
            return false;
        }
        self.queue.reset(text.audio.clone());
        self.text = Some(text);
        self.scroll = 0;
        self.loading = false;
        true
    }

    /// Summary of the selected surah, once the index is loaded.
    #[must_use]
    pub fn current_summary(&self) -> Option<&SurahSummary> {
        self.surahs.iter().find(|s| s.number == self.current)
    }

    /// Label for the audio bar, e.g. `"سورة 2 — آية 5"`.
    #[must_use]
    pub fn audio_label(&self) -> String {
        if self.queue.playback() == Playback::Stopped && self.queue.index() == 0 {
            return "—".to_string();
        }
        format!("سورة {} — آية {}", self.current, self.queue.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioQueue, Playback, next_translation};

    fn queue(n: usize) -> AudioQueue {
        let mut q = AudioQueue::default();
        q.reset((1..=n).map(|i| Some(format!("https://cdn/{i}.mp3"))).collect());
        q
    }

    #[test]
    /// What: Navigation clamps at both ends.
    ///
    /// Inputs:
    /// - Three-ayah queue; previous at the start, next past the end.
    ///
    /// Output:
    /// - Index stays within `0..=2`.
    fn navigation_clamps() {
        let mut q = queue(3);
        assert_eq!(q.previous().as_deref(), Some("https://cdn/1.mp3"));
        assert_eq!(q.index(), 0);
        q.next();
        q.next();
        assert_eq!(q.next().as_deref(), Some("https://cdn/3.mp3"));
        assert_eq!(q.index(), 2);
    }

    #[test]
    /// What: Finishing advances and stops after the last ayah.
    ///
    /// Inputs:
    /// - Two-ayah queue played from the start.
    ///
    /// Output:
    /// - Second URL, then `None` with playback stopped.
    fn finishing_advances_then_stops() {
        let mut q = queue(2);
        q.play_surah();
        assert_eq!(q.finished().as_deref(), Some("https://cdn/2.mp3"));
        assert_eq!(q.finished(), None);
        assert_eq!(q.playback(), Playback::Stopped);
    }

    #[test]
    /// What: Toggle pauses a playing ayah and resumes it.
    ///
    /// Inputs:
    /// - Fresh queue toggled three times.
    ///
    /// Output:
    /// - Play, pause, play of the same ayah.
    fn toggle_cycles() {
        let mut q = queue(2);
        assert!(q.toggle().is_some());
        assert_eq!(q.toggle(), None);
        assert_eq!(q.playback(), Playback::Paused);
        assert_eq!(q.toggle().as_deref(), Some("https://cdn/1.mp3"));
    }

    #[test]
    /// What: Translation cycle wraps and recovers from unknown values.
    ///
    /// Inputs:
    /// - Each edition plus an unknown one.
    ///
    /// Output:
    /// - Next edition in order.
    fn translation_cycle() {
        assert_eq!(next_translation("en.sahih"), "en.pickthall");
        assert_eq!(next_translation("en.pickthall"), "none");
        assert_eq!(next_translation("none"), "en.sahih");
        assert_eq!(next_translation("fr.hamidullah"), "en.sahih");
    }
}
