use std::fs;
use std::path::{Path, PathBuf};

use super::paths::settings_path;
use super::types::{GeolocationMode, Settings};
use crate::util::config::{parse_key_value, skip_comment_or_empty, strip_inline_comment};

/// Written to `settings.conf` on first run.
pub(crate) const SETTINGS_SKELETON: &str = "# Noor settings\n\
#\n\
# Format: key = value. Lines starting with # are comments.\n\
#\n\
# IANA time zone for prayer times (detected from TZ or /etc/localtime when empty)\n\
# timezone = Asia/Riyadh\n\
#\n\
# Translation shown under each ayah: en.sahih, en.pickthall, or none\n\
translation = en.sahih\n\
#\n\
# Program that plays a recitation URL (must be on PATH)\n\
audio_player = mpv\n\
#\n\
# JSON-lines orientation readings, e.g. {\"compassHeading\": 123.4}\n\
# orientation_source = /run/user/1000/heading.fifo\n\
#\n\
# Device position: ip (approximate via IP lookup) or off\n\
geolocation = ip\n\
#\n\
# Location used before any is stored (Makkah)\n\
default_latitude = 21.3891\n\
default_longitude = 39.8579\n\
#\n\
# Service endpoints\n\
# aladhan_url = https://api.aladhan.com/v1\n\
# quran_url = https://api.alquran.cloud/v1\n\
# hadith_url = https://api.hadith.gading.dev\n\
# nominatim_url = https://nominatim.openstreetmap.org\n\
# ipgeo_url = https://ipapi.co/json/\n";

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: File text.
///
/// Output:
/// - Settings with every recognised key applied over the defaults.
///
/// Details:
/// - Keys are case-insensitive; `-`, `.` and spaces normalise to `_`.
/// - Unparseable values keep the default and are logged.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, raw_val)) = parse_key_value(line) else {
            continue;
        };
        let key = raw_key.to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(&raw_val);
        if val.is_empty() {
            continue;
        }
        match key.as_str() {
            "timezone" | "tz" => out.timezone = Some(val.to_string()),
            "translation" => out.translation = val.to_string(),
            "audio_player" | "player" => out.audio_player = val.to_string(),
            "orientation_source" => out.orientation_source = Some(PathBuf::from(val)),
            "geolocation" => match val.to_ascii_lowercase().as_str() {
                "ip" | "on" | "true" => out.geolocation = GeolocationMode::Ip,
                "off" | "false" | "none" => out.geolocation = GeolocationMode::Off,
                other => tracing::warn!(value = other, "[Config] Unknown geolocation mode"),
            },
            "default_latitude" => match val.parse::<f64>() {
                Ok(v) if (-90.0..=90.0).contains(&v) => out.default_anchor.lat = v,
                _ => tracing::warn!(value = val, "[Config] Invalid default_latitude"),
            },
            "default_longitude" => match val.parse::<f64>() {
                Ok(v) if (-180.0..=180.0).contains(&v) => out.default_anchor.lng = v,
                _ => tracing::warn!(value = val, "[Config] Invalid default_longitude"),
            },
            "aladhan_url" => out.endpoints.aladhan = val.to_string(),
            "quran_url" => out.endpoints.quran = val.to_string(),
            "hadith_url" => out.endpoints.hadith = val.to_string(),
            "nominatim_url" => out.endpoints.nominatim = val.to_string(),
            "ipgeo_url" => out.endpoints.ipgeo = val.to_string(),
            _ => tracing::debug!(key = %key, "[Config] Ignoring unknown setting"),
        }
    }
    out
}

/// Read settings from `path`, writing the skeleton first when the file is missing.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.is_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SETTINGS_SKELETON) {
            Ok(()) => tracing::info!(path = %path.display(), "[Config] Wrote settings skeleton"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "[Config] Could not write settings skeleton"),
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "[Config] Using default settings");
            Settings::default()
        }
    }
}

/// Load user settings from `settings.conf` in the config directory.
/// Falls back to `Settings::default()` when the file cannot be read.
pub fn settings() -> Settings {
    load_settings_from(&settings_path())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{SETTINGS_SKELETON, load_settings_from, parse_settings};
    use crate::theme::types::{GeolocationMode, Settings};

    #[test]
    /// What: The shipped skeleton parses to the defaults.
    ///
    /// Inputs:
    /// - `SETTINGS_SKELETON`.
    ///
    /// Output:
    /// - Equal to `Settings::default()`.
    fn skeleton_matches_defaults() {
        assert_eq!(parse_settings(SETTINGS_SKELETON), Settings::default());
    }

    #[test]
    /// What: Recognised keys override defaults; bad values are ignored.
    ///
    /// Inputs:
    /// - Mixed-case keys, inline comments, an out-of-range latitude.
    ///
    /// Output:
    /// - Overrides applied; latitude unchanged.
    fn overrides_and_invalid_values() {
        let s = parse_settings(
            "TIMEZONE = Asia/Riyadh\n\
             timezone = Africa/Cairo # local\n\
             geolocation = off\n\
             default_latitude = 123\n\
             default_longitude = 31.2357\n\
             orientation_source = /tmp/heading.jsonl\n\
             quran_url = http://127.0.0.1:9/v1\n",
        );
        assert_eq!(s.timezone.as_deref(), Some("Africa/Cairo"));
        assert_eq!(s.geolocation, GeolocationMode::Off);
        assert!((s.default_anchor.lat - 21.3891).abs() < 1e-9);
        assert!((s.default_anchor.lng - 31.2357).abs() < 1e-9);
        assert_eq!(
            s.orientation_source,
            Some(PathBuf::from("/tmp/heading.jsonl"))
        );
        assert_eq!(s.endpoints.quran, "http://127.0.0.1:9/v1");
    }

    #[test]
    /// What: A missing file is created from the skeleton.
    ///
    /// Inputs:
    /// - Path inside an empty temp dir.
    ///
    /// Output:
    /// - File exists afterwards; defaults returned.
    fn missing_file_gets_skeleton() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.conf");
        let s = load_settings_from(&path);
        assert!(path.is_file());
        assert_eq!(s, Settings::default());
    }
}
