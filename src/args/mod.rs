//! Command-line argument parsing and handling.

pub mod definition;
pub mod print;
pub mod utils;

pub use definition::Args;
pub use utils::determine_log_level;
