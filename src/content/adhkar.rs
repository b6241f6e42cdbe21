//! Remembrance texts grouped by time of day.

/// A titled group of remembrance texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdhkarGroup {
    /// Section heading.
    pub title: &'static str,
    /// Texts in display order.
    pub items: &'static [&'static str],
}

/// Said after Fajr.
pub const MORNING: AdhkarGroup = AdhkarGroup {
    title: "أذكار الصباح",
    items: &[
        "أصبحنا وأصبح الملك لله، والحمد لله، لا إله إلا الله وحده لا شريك له، له الملك وله الحمد وهو على كل شيء قدير.",
        "اللهم بك أصبحنا وبك أمسينا وبك نحيا وبك نموت وإليك النشور.",
        "اللهم أنت ربي لا إله إلا أنت، خلقتني وأنا عبدك...",
    ],
};

/// Said after Asr.
pub const EVENING: AdhkarGroup = AdhkarGroup {
    title: "أذكار المساء",
    items: &[
        "أمسينا وأمسى الملك لله والحمد لله...",
        "اللهم بك أمسينا وبك أصبحنا وبك نحيا وبك نموت وإليك المصير.",
        "أعوذ بكلمات الله التامات من شر ما خلق.",
    ],
};

/// Any time.
pub const GENERAL: AdhkarGroup = AdhkarGroup {
    title: "أذكار عامة",
    items: &[
        "سبحان الله وبحمده، سبحان الله العظيم.",
        "لا إله إلا الله وحده لا شريك له، له الملك وله الحمد وهو على كل شيء قدير (100 مرة).",
        "أستغفر الله وأتوب إليه.",
    ],
};

/// All groups in display order.
#[must_use]
pub const fn groups() -> [AdhkarGroup; 3] {
    [MORNING, EVENING, GENERAL]
}

/// Total number of texts across all groups.
#[must_use]
pub fn total_items() -> usize {
    groups().iter().map(|g| g.items.len()).sum()
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Every group has a title and at least one text.
    ///
    /// Inputs:
    /// - The three static groups.
    ///
    /// Output:
    /// - Non-empty titles and items; nine texts overall.
    fn groups_are_populated() {
        for g in super::groups() {
            assert!(!g.title.is_empty());
            assert!(g.items.iter().all(|t| !t.trim().is_empty()));
        }
        assert_eq!(super::total_items(), 9);
    }
}
