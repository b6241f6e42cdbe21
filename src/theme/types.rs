use std::path::PathBuf;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::location::{Coordinates, DEFAULT_ANCHOR};
use crate::net::Endpoints;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels.
    pub mantle: Color,
    /// Subtle surface color for selected rows.
    pub surface: Color,
    /// Muted border color.
    pub overlay: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext: Color,
    /// Accent for headings and the active tab.
    pub accent: Color,
    /// Accent for the next prayer and the qibla needle.
    pub highlight: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
}

/// Persisted theme preference (`"dark"` or `"light"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark background (default).
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Palette for this mode.
    #[must_use]
    pub const fn palette(self) -> Theme {
        match self {
            Self::Dark => Theme {
                base: Color::Rgb(0x0f, 0x17, 0x1a),
                mantle: Color::Rgb(0x16, 0x22, 0x26),
                surface: Color::Rgb(0x24, 0x36, 0x3b),
                overlay: Color::Rgb(0x4a, 0x62, 0x68),
                text: Color::Rgb(0xe6, 0xed, 0xe8),
                subtext: Color::Rgb(0x9f, 0xb3, 0xab),
                accent: Color::Rgb(0x2e, 0xc4, 0x8f),
                highlight: Color::Rgb(0xe8, 0xc5, 0x6a),
                green: Color::Rgb(0x8c, 0xd9, 0x8f),
                yellow: Color::Rgb(0xf2, 0xd4, 0x7c),
                red: Color::Rgb(0xf0, 0x7a, 0x7a),
            },
            Self::Light => Theme {
                base: Color::Rgb(0xf7, 0xf5, 0xef),
                mantle: Color::Rgb(0xec, 0xe8, 0xdc),
                surface: Color::Rgb(0xdc, 0xe6, 0xdf),
                overlay: Color::Rgb(0x9a, 0xa8, 0xa2),
                text: Color::Rgb(0x1c, 0x26, 0x24),
                subtext: Color::Rgb(0x4e, 0x5d, 0x58),
                accent: Color::Rgb(0x0b, 0x7a, 0x58),
                highlight: Color::Rgb(0x9a, 0x6b, 0x00),
                green: Color::Rgb(0x2f, 0x7d, 0x32),
                yellow: Color::Rgb(0x8a, 0x6d, 0x00),
                red: Color::Rgb(0xb0, 0x28, 0x28),
            },
        }
    }
}

/// How the device position is approximated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GeolocationMode {
    /// IP geolocation lookup.
    #[default]
    Ip,
    /// Capability absent; locate always fails with a manual-entry hint.
    Off,
}

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// IANA zone to request timings in; detected when unset.
    pub timezone: Option<String>,
    /// Initial translation edition (`none` hides it).
    pub translation: String,
    /// Executable used to play recitation URLs.
    pub audio_player: String,
    /// JSON-lines orientation source; keyboard heading when unset.
    pub orientation_source: Option<PathBuf>,
    /// Device position approximation.
    pub geolocation: GeolocationMode,
    /// Location used when nothing is stored.
    pub default_anchor: Coordinates,
    /// Service base URLs.
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: None,
            translation: "en.sahih".to_string(),
            audio_player: "mpv".to_string(),
            orientation_source: None,
            geolocation: GeolocationMode::Ip,
            default_anchor: DEFAULT_ANCHOR,
            endpoints: Endpoints::default(),
        }
    }
}
