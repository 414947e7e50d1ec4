//! Configuration management for the token screener.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication): `.env` loading
//! goes through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Default upstream base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.dexscreener.com";

/// Chain the market-data endpoint is queried on.
pub const DEFAULT_CHAIN_ID: &str = "solana";

/// Configuration for the token screener.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API base URL
    pub api_base_url: String,

    /// Chain identifier used in market-data paths (default: "solana")
    pub chain_id: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// TTL for cached profile pages in seconds (default: 120)
    pub profile_cache_ttl_secs: u64,

    /// TTL for cached per-token market data in seconds (default: 30)
    pub market_data_cache_ttl_secs: u64,

    /// TTL for cached enriched pages in seconds (default: 60)
    pub enriched_cache_ttl_secs: u64,

    /// Number of market-data fetches issued concurrently (default: 5)
    pub enrichment_batch_size: usize,

    /// Page size used when a caller omits one (default: 15)
    pub default_page_size: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SCREENER_API_BASE_URL`: Upstream base URL (default: https://api.dexscreener.com)
    /// - `SCREENER_CHAIN_ID`: Chain path segment (default: "solana")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `PROFILE_CACHE_TTL_SECS`: Profile page TTL (default: 120)
    /// - `MARKET_DATA_CACHE_TTL_SECS`: Market data TTL (default: 30)
    /// - `ENRICHED_CACHE_TTL_SECS`: Enriched page TTL (default: 60)
    /// - `ENRICHMENT_BATCH_SIZE`: Concurrent fetches per batch (default: 5)
    /// - `DEFAULT_PAGE_SIZE`: Page size when none is given (default: 15)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, silently
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("SCREENER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SCREENER_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let chain_id = env::var("SCREENER_CHAIN_ID").unwrap_or_else(|_| DEFAULT_CHAIN_ID.to_string());
        if chain_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SCREENER_CHAIN_ID".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let profile_cache_ttl_secs = Self::parse_env_u64("PROFILE_CACHE_TTL_SECS", 120)?;
        let market_data_cache_ttl_secs = Self::parse_env_u64("MARKET_DATA_CACHE_TTL_SECS", 30)?;
        let enriched_cache_ttl_secs = Self::parse_env_u64("ENRICHED_CACHE_TTL_SECS", 60)?;
        let enrichment_batch_size = Self::parse_env_usize("ENRICHMENT_BATCH_SIZE", 5)?;
        let default_page_size = Self::parse_env_usize("DEFAULT_PAGE_SIZE", 15)?;

        if enrichment_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "ENRICHMENT_BATCH_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if default_page_size == 0 || default_page_size > 100 {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_PAGE_SIZE".to_string(),
                reason: "Must be between 1 and 100".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            chain_id,
            request_timeout,
            profile_cache_ttl_secs,
            market_data_cache_ttl_secs,
            enriched_cache_ttl_secs,
            enrichment_batch_size,
            default_page_size,
            log_level,
        })
    }

    /// TTL for profile pages.
    pub fn profile_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_cache_ttl_secs)
    }

    /// TTL for single-token market data.
    pub fn market_data_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.market_data_cache_ttl_secs)
    }

    /// TTL for enriched pages.
    pub fn enriched_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.enriched_cache_ttl_secs)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            request_timeout: 10,
            profile_cache_ttl_secs: 120,
            market_data_cache_ttl_secs: 30,
            enriched_cache_ttl_secs: 60,
            enrichment_batch_size: 5,
            default_page_size: 15,
            log_level: "error".to_string(),
        }
    }
}
