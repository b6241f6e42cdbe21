//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;
use noor::app::LaunchOptions;
use noor::location::Coordinates;

/// Noor - prayer times, qibla direction, Quran, adhkar and hadith in the terminal
#[derive(Parser, Debug)]
#[command(name = "noor")]
#[command(version)]
#[command(about = "Prayer times, qibla direction, Quran, adhkar and hadith in the terminal", long_about = None)]
pub struct Args {
    /// Start at this latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Start at this longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Look up this city at startup (requires --country)
    #[arg(long, requires = "country")]
    pub city: Option<String>,

    /// Country for --city
    #[arg(long, requires = "city")]
    pub country: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Read device orientation from this JSON-lines file or FIFO
    #[arg(long)]
    pub orientation_source: Option<PathBuf>,

    /// Print today's schedule and the qibla bearing, then exit
    #[arg(short, long)]
    pub print: bool,
}

impl Args {
    /// What: Startup overrides for the runtime.
    ///
    /// Details:
    /// - `--lat/--lon` and `--city/--country` are only used as complete pairs.
    #[must_use]
    pub fn launch_options(&self) -> LaunchOptions {
        let coordinates = match (self.lat, self.lon) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        let place = match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some((city.clone(), country.clone())),
            _ => None,
        };
        LaunchOptions {
            coordinates,
            place,
            orientation_source: self.orientation_source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    /// What: Coordinate and place pairs become launch overrides.
    ///
    /// Inputs:
    /// - `--lat -33.9 --lon 18.4 --city Cairo --country Egypt`.
    ///
    /// Output:
    /// - Both overrides set; negative latitude accepted.
    fn launch_options_from_pairs() {
        let args = Args::try_parse_from([
            "noor", "--lat", "-33.9", "--lon", "18.4", "--city", "Cairo", "--country", "Egypt",
        ])
        .expect("valid args");
        let launch = args.launch_options();
        let coords = launch.coordinates.expect("coordinates");
        assert!((coords.lat + 33.9).abs() < 1e-9);
        assert_eq!(launch.place, Some(("Cairo".into(), "Egypt".into())));
    }

    #[test]
    /// What: Half a pair is rejected by the parser.
    ///
    /// Inputs:
    /// - `--lat 21.4` alone.
    ///
    /// Output:
    /// - Parse error.
    fn incomplete_pair_rejected() {
        assert!(Args::try_parse_from(["noor", "--lat", "21.4"]).is_err());
        assert!(Args::try_parse_from(["noor", "--city", "Cairo"]).is_err());
    }
}
