//! Caching utilities for the token screener.
//!
//! This module provides a generic per-entry TTL cache and the payload type the
//! enrichment pipeline stores in it.

pub mod ttl_cache;

pub use ttl_cache::{CacheStats, TtlCache};

use crate::models::{Token, TokenMarketData, TokenProfile};

/// The three data shapes kept in the shared screener cache.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    /// One page of latest token profiles
    Profiles(Vec<TokenProfile>),

    /// Market data for a single token address
    MarketData(TokenMarketData),

    /// One fully enriched page
    Tokens(Vec<Token>),
}

/// Process-wide cache shared by the pipeline and the admin hooks.
pub type ScreenerCache = TtlCache<String, CachedPayload>;
