//! Small UI-facing enums.

/// Top-level tabs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Prayer times and countdown.
    #[default]
    Prayer,
    /// Qibla compass.
    Qibla,
    /// Quran reading and recitation.
    Quran,
    /// Remembrance texts.
    Adhkar,
    /// Hadith browsing.
    Hadith,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 5] = [
        Self::Prayer,
        Self::Qibla,
        Self::Quran,
        Self::Adhkar,
        Self::Hadith,
    ];

    /// Arabic tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Prayer => "مواقيت الصلاة",
            Self::Qibla => "القبلة",
            Self::Quran => "القرآن",
            Self::Adhkar => "الأذكار",
            Self::Hadith => "الأحاديث",
        }
    }

    /// Position in [`Tab::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tab at `index`, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following tab, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding tab, wrapping.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::Tab;

    #[test]
    /// What: Tab cycling wraps in both directions.
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Hadith.next(), Tab::Prayer);
        assert_eq!(Tab::Prayer.previous(), Tab::Hadith);
        assert_eq!(Tab::from_index(2), Some(Tab::Quran));
        assert_eq!(Tab::from_index(9), None);
    }
}
