//! Controller-owned application state.
//!
//! Everything the UI shows lives in one [`AppState`] owned by the event loop; background
//! workers never touch it and report back through messages instead.

pub mod app_state;
pub mod modal;
pub mod types;

pub use app_state::AppState;
pub use modal::{ManualField, Modal};
pub use types::Tab;
