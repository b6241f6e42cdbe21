//! Modal dialog state for the UI.

/// Field focused in the manual location form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManualField {
    /// City input.
    #[default]
    City,
    /// Country input.
    Country,
}

impl ManualField {
    /// The other field.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::City => Self::Country,
            Self::Country => Self::City,
        }
    }
}

/// What: Dialog layered over the active tab.
///
/// Details:
/// - At most one modal is open; opening another replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    /// No dialog.
    #[default]
    None,
    /// One-shot notification, dismissed with Enter or Esc.
    Alert {
        /// Text shown.
        message: String,
    },
    /// City/country entry.
    ManualLocation {
        /// City text.
        city: String,
        /// Country text.
        country: String,
        /// Field receiving keystrokes.
        field: ManualField,
    },
    /// Fuzzy surah selection.
    SurahPicker {
        /// Filter text.
        query: String,
        /// Highlighted row among the filtered results.
        selected: usize,
    },
    /// Key reference.
    Help,
}

impl Modal {
    /// Empty manual-location form.
    #[must_use]
    pub fn manual_location() -> Self {
        Self::ManualLocation {
            city: String::new(),
            country: String::new(),
            field: ManualField::City,
        }
    }

    /// Whether no dialog is open.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
