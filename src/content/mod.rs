//! Static local content.

pub mod adhkar;
