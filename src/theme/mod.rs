//! Configuration, directories and color palettes.

/// Path resolution for config directories.
mod paths;
/// `settings.conf` loading.
mod settings;
/// Palette and settings types.
mod types;

pub use paths::{config_dir, logs_dir, settings_path, store_path};
pub use settings::{load_settings_from, parse_settings, settings};
pub use types::{GeolocationMode, Settings, Theme, ThemeMode};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that change `HOME`.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
