//! Dollar quote feed
//!
//! Fetches the "dólar blue" sell rate from a public API. The quote is
//! cached for an hour and a hardcoded fallback is used when the feed is
//! unreachable: pricing must never block on the upstream.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

/// Fallback rate when the feed is down
pub const COTIZACION_FALLBACK: f64 = 1200.0;

const CACHE_TTL: Duration = Duration::from_secs(3600);
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DolarApiResponse {
    venta: f64,
}

#[derive(Clone)]
pub struct DolarService {
    client: reqwest::Client,
    url: String,
    fallback: f64,
    /// Fixed rate for tests; skips the network entirely
    fixed: Option<f64>,
    cache: Arc<RwLock<Option<(Instant, f64)>>>,
}

impl DolarService {
    pub fn new(url: impl Into<String>, fallback: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            fallback,
            fixed: None,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// A service that always answers with a fixed rate (tests)
    pub fn fixed(cotizacion: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: String::new(),
            fallback: cotizacion,
            fixed: Some(cotizacion),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Current sell rate. Never fails: serves the cached value while
    /// fresh, otherwise refetches, otherwise falls back.
    pub async fn cotizacion(&self) -> f64 {
        if let Some(fixed) = self.fixed {
            return fixed;
        }

        if let Some((at, value)) = *self.cache.read().await
            && at.elapsed() < CACHE_TTL
        {
            return value;
        }

        match self.fetch().await {
            Ok(value) => {
                *self.cache.write().await = Some((Instant::now(), value));
                value
            }
            Err(e) => {
                tracing::warn!("Quote feed unavailable, using fallback: {e}");
                // A stale cached value still beats the constant
                if let Some((_, value)) = *self.cache.read().await {
                    value
                } else {
                    self.fallback
                }
            }
        }
    }

    async fn fetch(&self) -> anyhow::Result<f64> {
        let resp: DolarApiResponse = self
            .client
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.venta <= 0.0 {
            anyhow::bail!("feed returned non-positive rate {}", resp.venta);
        }
        Ok(resp.venta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_rate_skips_the_network() {
        let svc = DolarService::fixed(1187.0);
        assert_eq!(svc.cotizacion().await, 1187.0);
    }

    #[tokio::test]
    async fn unreachable_feed_falls_back() {
        let svc = DolarService::new("http://127.0.0.1:1/nope", COTIZACION_FALLBACK);
        assert_eq!(svc.cotizacion().await, COTIZACION_FALLBACK);
    }
}
