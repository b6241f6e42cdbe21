//! Terminal application: runtime loop, background workers and result handling.

pub mod handlers;
pub mod messages;
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;
pub mod workers;

pub use messages::WorkerMsg;
pub use runtime::init::LaunchOptions;
pub use runtime::{is_headless, run};
pub use workers::Workers;
