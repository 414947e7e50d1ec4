//! HTTP client for the DexScreener public API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles URL building, error mapping
//! and request timing for the two read endpoints the screener consumes.

mod async_wrapper;
pub use async_wrapper::{AsyncScreenerClient, AsyncScreenerClientImpl};

use crate::config::Config;
use crate::error::{ScreenerApiError, ScreenerApiResult};
use crate::metrics::{Metrics, RequestOutcome, RequestTimer};
use crate::models::{TokenMarketData, TokenProfile};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the DexScreener API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ScreenerClient {
    /// Base URL for the upstream API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ScreenerClient {
    /// Create a new ScreenerClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_metrics(config, Metrics::new())
    }

    /// Create a client that records into an existing metrics collector.
    pub fn with_metrics(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a ScreenerClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request and return the response body.
    fn get(&self, path: &str) -> ScreenerApiResult<String> {
        let url = self.build_url(path);
        let timer = RequestTimer::start(&self.metrics);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        match result {
            Ok(response) => {
                tracing::debug!("GET {} - Success (status: {})", url, response.status());
                timer.finish(RequestOutcome::Success);
                response
                    .into_string()
                    .map_err(|e| ScreenerApiError::HttpError(e.to_string()))
            }
            Err(e) => {
                tracing::debug!("GET {} - Error: {}", url, e);
                timer.finish(match &e {
                    ScreenerApiError::RateLimitExceeded => RequestOutcome::RateLimited,
                    _ => RequestOutcome::Failed,
                });
                Err(e)
            }
        }
    }

    /// Map a ureq error to a ScreenerApiError.
    fn map_error(&self, error: ureq::Error) -> ScreenerApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => ScreenerApiError::NotFound(message),
                    429 => ScreenerApiError::RateLimitExceeded,
                    _ => ScreenerApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ScreenerApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ScreenerApiError::Timeout
                } else {
                    ScreenerApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch the full latest-profiles list.
    ///
    /// Upstream has no server-side paging; callers slice the result.
    pub fn get_latest_profiles(&self) -> ScreenerApiResult<Vec<TokenProfile>> {
        let body = self.get("/token-profiles/latest/v1")?;
        let profiles: Vec<TokenProfile> =
            serde_json::from_str(&body).map_err(ScreenerApiError::JsonError)?;

        self.metrics.record_profiles_fetched(profiles.len());
        Ok(profiles)
    }

    /// Fetch all trading pairs upstream lists for a token on a chain.
    ///
    /// A `null` body is treated as an empty list.
    pub fn get_token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> ScreenerApiResult<Vec<TokenMarketData>> {
        if token_address.trim().is_empty() {
            return Err(ScreenerApiError::InvalidRequest(
                "Token address cannot be empty".to_string(),
            ));
        }

        let path = format!(
            "/tokens/v1/{}/{}",
            urlencoding::encode(chain_id),
            urlencoding::encode(token_address)
        );
        let body = self.get(&path)?;

        let pairs: Option<Vec<TokenMarketData>> =
            serde_json::from_str(&body).map_err(ScreenerApiError::JsonError)?;

        Ok(pairs.unwrap_or_default())
    }
}
