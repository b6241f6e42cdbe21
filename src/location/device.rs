//! Device position capability.
//!
//! A terminal has no GPS; the shipped provider approximates the device fix with an IP
//! geolocation lookup. [`CachedPositionProvider`] adds the "accept a fix up to N seconds
//! old" behaviour of platform geolocation APIs.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::Coordinates;
use crate::error::{NoorError, Result};
use crate::net::Gateway;
use crate::sources::ipgeo;

/// Bounds for a one-shot position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most precise source available.
    pub enable_high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// Accept a previous fix no older than this.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

/// Source of one-shot position fixes.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// What: Produce a position fix.
    ///
    /// # Errors
    /// - `NoorError::LocationUnavailable` when no fix can be produced.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates>;
}

/// Position capability that is absent on this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledPositionProvider;

#[async_trait]
impl PositionProvider for DisabledPositionProvider {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Err(NoorError::LocationUnavailable(
            "geolocation unsupported".to_string(),
        ))
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpPositionProvider {
    /// HTTP gateway.
    gateway: Gateway,
}

impl IpPositionProvider {
    /// Create a provider using `gateway`'s IP geolocation endpoint.
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl PositionProvider for IpPositionProvider {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates> {
        if options.enable_high_accuracy {
            tracing::trace!("[Location] IP lookup cannot honour high accuracy; using best effort");
        }
        ipgeo::lookup(&self.gateway).await
    }
}

/// What: Wraps a provider and reuses its last fix while younger than `maximum_age`.
pub struct CachedPositionProvider<P> {
    /// Underlying provider.
    inner: P,
    /// Last successful fix and when it was taken.
    last: Mutex<Option<(Instant, Coordinates)>>,
}

impl<P: PositionProvider> CachedPositionProvider<P> {
    /// Wrap `inner` with an empty cache.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }

    /// Cached fix if it is no older than `max_age`.
    fn fresh(&self, max_age: Duration) -> Option<Coordinates> {
        let guard = self.last.lock().ok()?;
        let (at, coords) = (*guard)?;
        (at.elapsed() <= max_age).then_some(coords)
    }
}

#[async_trait]
impl<P: PositionProvider> PositionProvider for CachedPositionProvider<P> {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates> {
        if let Some(coords) = self.fresh(options.maximum_age) {
            tracing::debug!("[Location] Reusing cached fix");
            return Ok(coords);
        }
        let coords = self.inner.current_position(options).await?;
        if let Ok(mut guard) = self.last.lock() {
            *guard = Some((Instant::now(), coords));
        }
        Ok(coords)
    }
}
