//! Wire formats and endpoint calls for the external services.
//!
//! Each submodule owns the DTOs of one service and exposes thin async fetchers over
//! [`crate::net::Gateway`]. Domain mapping happens in the engines, not here.

use serde::Deserialize;

pub mod aladhan;
pub mod hadith;
pub mod ipgeo;
pub mod nominatim;
pub mod quran;

/// `{"code": .., "data": ..}` envelope shared by the prayer, Quran and hadith services.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Payload.
    pub data: T,
}
