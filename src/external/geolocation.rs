use async_trait::async_trait;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::{
    api::{DynGeolocationProvider, GeolocationProvider},
    config::Settings,
    entities::Coordinates,
    error::{geolocation_unsupported_error, timeout_error, Error},
};

/// Always reports the same position.
#[derive(Debug)]
pub struct FixedGeolocation {
    position: Coordinates,
}

impl FixedGeolocation {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Ok(self.position)
    }
}

#[derive(Debug, Default)]
pub struct UnsupportedGeolocation;

#[async_trait]
impl GeolocationProvider for UnsupportedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Err(geolocation_unsupported_error())
    }
}

#[derive(Clone, Copy, Debug)]
struct Fix {
    position: Coordinates,
    taken_at: DateTime<Utc>,
}

/// Bounds each fix by a timeout and reuses a successful fix while it is
/// younger than `max_age`.
pub struct CachedGeolocation<P> {
    inner: P,
    timeout: Duration,
    max_age: chrono::Duration,
    last_fix: Mutex<Option<Fix>>,
}

impl<P> CachedGeolocation<P> {
    pub fn new(inner: P, timeout: Duration, max_age: Duration) -> Self {
        Self {
            inner,
            timeout,
            max_age: chrono::Duration::from_std(max_age)
                .unwrap_or_else(|_| chrono::Duration::zero()),
            last_fix: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P> GeolocationProvider for CachedGeolocation<P>
where
    P: GeolocationProvider + Send + Sync,
{
    #[tracing::instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinates, Error> {
        let now = Utc::now();

        if let Some(fix) = *self.last_fix.lock().await {
            if now - fix.taken_at < self.max_age {
                tracing::debug!("reusing position taken at {}", fix.taken_at);
                return Ok(fix.position);
            }
        }

        let position = timeout(self.timeout, self.inner.current_position())
            .await
            .map_err(|_| timeout_error())??;

        *self.last_fix.lock().await = Some(Fix {
            position,
            taken_at: Utc::now(),
        });

        Ok(position)
    }
}

/// Provider described by the settings: the configured position, or none.
pub fn from_settings(settings: &Settings) -> DynGeolocationProvider {
    let timeout = settings.geolocation_timeout;
    let max_age = settings.geolocation_max_age;

    match settings.position {
        Some(position) => Arc::new(CachedGeolocation::new(
            FixedGeolocation::new(position),
            timeout,
            max_age,
        )) as DynGeolocationProvider,
        None => Arc::new(CachedGeolocation::new(
            UnsupportedGeolocation,
            timeout,
            max_age,
        )) as DynGeolocationProvider,
    }
}
