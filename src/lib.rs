//! Library entry for Noor exposing the engines and runtime for integration tests.

pub mod app;
pub mod content;
pub mod error;
pub mod events;
pub mod hadith;
pub mod location;
pub mod net;
pub mod prayer;
pub mod qibla;
pub mod quran;
pub mod sources;
pub mod state;
pub mod store;
pub mod theme;
pub mod ui;
pub mod util;
