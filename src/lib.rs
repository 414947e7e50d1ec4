//! Token Screener MCP Server - lists newly profiled tokens enriched with live
//! market data, over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **cache**: Per-entry TTL cache with hit/miss statistics
//! - **domain**: Token address value object and USD formatting rules
//! - **models**: Upstream profiles and market data, and the enriched token
//! - **client**: HTTP client for the DexScreener API
//! - **repositories**: Paged profile and per-token market data access
//! - **tools**: Enrichment pipeline and screening (search, filter, sort)
//! - **services**: Validation, fail-empty listing and cache admin
//! - **server**: MCP protocol server

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod tools;

pub use cache::{CacheStats, CachedPayload, ScreenerCache, TtlCache};
pub use client::ScreenerClient;
pub use config::Config;
pub use error::{ConfigError, PipelineError, ScreenerApiError};
pub use metrics::{Metrics, MetricsSummary, RequestOutcome, RequestTimer};
pub use models::{Token, TokenLinks, TokenMarketData, TokenProfile};
pub use server::TokenScreenerServer;
pub use services::{TokenService, TokenServiceImpl};
pub use tools::{EnrichmentPipeline, PipelineSettings, ScreenFilters, SortBy, SortOrder};
