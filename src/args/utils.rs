//! Utility functions for command-line argument handling.

use crate::args::Args;

/// What: Log level to install, from the flags and the environment.
///
/// Output:
/// - `"debug"` with `--verbose`, `"trace"` when `NOOR_TRACE=1`, else `--log-level`.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("NOOR_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}
