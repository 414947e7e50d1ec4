use crate::error::ScreenerApiResult;
use crate::models::{TokenMarketData, TokenProfile};
use async_trait::async_trait;

/// Source of token profiles.
///
/// Provides abstraction over profile retrieval, enabling different
/// implementations (API client, mock, cached).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieve one page of the latest profiles.
    ///
    /// `page` is 1-based; page 0 is treated as page 1. A page past the end of
    /// the list is empty.
    async fn latest_page(&self, page: usize, limit: usize) -> ScreenerApiResult<Vec<TokenProfile>>;
}

/// Source of live market data.
#[async_trait]
pub trait MarketDataRepository: Send + Sync {
    /// Market data for a token, or `None` when upstream lists no pair for it.
    async fn get_market_data(&self, token_address: &str)
        -> ScreenerApiResult<Option<TokenMarketData>>;
}
