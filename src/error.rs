//! Error types for the token screener.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the upstream screener API.
#[derive(Error, Debug)]
pub enum ScreenerApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced by the enrichment pipeline and the token service.
///
/// The public `get_enriched_tokens` entry point flattens all of these into an
/// empty list; `try_get_enriched_tokens` exposes them.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caller supplied parameters outside the accepted range
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream call failed and no fallback applied
    #[error("Upstream error: {0}")]
    Upstream(#[from] ScreenerApiError),

    /// A concurrent fetch task panicked or was cancelled
    #[error("Enrichment task failed: {0}")]
    TaskFailed(String),
}

/// Convenience type alias for Results with ScreenerApiError
pub type ScreenerApiResult<T> = Result<T, ScreenerApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with PipelineError
pub type PipelineResult<T> = Result<T, PipelineError>;
