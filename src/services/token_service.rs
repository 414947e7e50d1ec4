//! Token service layer.
//!
//! Business logic for listing, screening and inspecting enriched tokens, plus
//! the cache admin hooks.

use crate::cache::CacheStats;
use crate::domain::{format_compact_usd, TokenAddress};
use crate::error::{PipelineError, PipelineResult};
use crate::metrics::MetricsSummary;
use crate::models::Token;
use crate::tools::{screen_tokens, EnrichmentPipeline, ScreenFilters};
use async_trait::async_trait;
use std::collections::HashSet;

/// Largest page size a screening call may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Largest number of pages a single screening call may load.
pub const MAX_SCREEN_PAGES: usize = 10;

/// Token service trait for business operations.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Enriched tokens for a page. Never fails: any error yields an empty list.
    async fn get_enriched_tokens(&self, page: usize, limit: usize) -> Vec<Token>;

    /// Enriched tokens for a page, with errors surfaced.
    async fn try_get_enriched_tokens(&self, page: usize, limit: usize)
        -> PipelineResult<Vec<Token>>;

    /// Load pages `1..=pages`, de-duplicate by address, then filter and sort.
    async fn screen_tokens(
        &self,
        pages: usize,
        limit: usize,
        filters: ScreenFilters,
    ) -> PipelineResult<Vec<Token>>;

    /// Enriched token for one address, `None` when upstream has no market data.
    async fn get_token_details(&self, token_address: &str) -> PipelineResult<Option<Token>>;

    /// Drop every cached entry. Counters are kept.
    fn clear_cache(&self);

    fn cache_stats(&self) -> CacheStats;

    fn metrics_summary(&self) -> MetricsSummary;
}

/// Format a market cap as a compact USD amount.
pub fn format_market_cap(value: f64) -> String {
    format_compact_usd(value)
}

/// Format a 24h volume as a compact USD amount.
pub fn format_volume(value: f64) -> String {
    format_compact_usd(value)
}

/// Format liquidity as a compact USD amount.
pub fn format_liquidity(value: f64) -> String {
    format_compact_usd(value)
}

/// Default implementation of TokenService.
pub struct TokenServiceImpl {
    pipeline: EnrichmentPipeline,
}

/// Validation helper functions.
impl TokenServiceImpl {
    fn validate_page(page: usize) -> Result<(), String> {
        if page == 0 {
            return Err("Page must be at least 1".to_string());
        }
        Ok(())
    }

    fn validate_limit(limit: usize) -> Result<(), String> {
        if limit == 0 {
            return Err("Limit must be at least 1".to_string());
        }
        Ok(())
    }

    fn validate_screen_limit(limit: usize) -> Result<(), String> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(format!("Limit must be between 1 and {}", MAX_PAGE_SIZE));
        }
        Ok(())
    }

    fn validate_pages(pages: usize) -> Result<(), String> {
        if pages == 0 || pages > MAX_SCREEN_PAGES {
            return Err(format!("Pages must be between 1 and {}", MAX_SCREEN_PAGES));
        }
        Ok(())
    }
}

impl TokenServiceImpl {
    pub fn new(pipeline: EnrichmentPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &EnrichmentPipeline {
        &self.pipeline
    }
}

#[async_trait]
impl TokenService for TokenServiceImpl {
    async fn get_enriched_tokens(&self, page: usize, limit: usize) -> Vec<Token> {
        match self.try_get_enriched_tokens(page, limit).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!("Error getting enriched tokens (page {}): {}", page, e);
                Vec::new()
            }
        }
    }

    async fn try_get_enriched_tokens(
        &self,
        page: usize,
        limit: usize,
    ) -> PipelineResult<Vec<Token>> {
        Self::validate_page(page).map_err(PipelineError::InvalidRequest)?;
        Self::validate_limit(limit).map_err(PipelineError::InvalidRequest)?;

        self.pipeline.enrich_page(page, limit).await
    }

    async fn screen_tokens(
        &self,
        pages: usize,
        limit: usize,
        filters: ScreenFilters,
    ) -> PipelineResult<Vec<Token>> {
        Self::validate_pages(pages).map_err(PipelineError::InvalidRequest)?;
        Self::validate_screen_limit(limit).map_err(PipelineError::InvalidRequest)?;

        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        for page in 1..=pages {
            let page_tokens = self.pipeline.enrich_page(page, limit).await?;
            tokens.extend(
                page_tokens
                    .into_iter()
                    .filter(|token| seen.insert(token.token_address.clone())),
            );
        }

        let screened = screen_tokens(&tokens, &filters);
        tracing::debug!(
            "Screened {} tokens across {} pages down to {}",
            tokens.len(),
            pages,
            screened.len()
        );

        Ok(screened)
    }

    async fn get_token_details(&self, token_address: &str) -> PipelineResult<Option<Token>> {
        let address = TokenAddress::new(token_address)
            .map_err(|e| PipelineError::InvalidRequest(e.to_string()))?;

        self.pipeline.get_token(address.as_str()).await
    }

    fn clear_cache(&self) {
        self.pipeline.cache().clear();
        tracing::info!("Token cache cleared");
    }

    fn cache_stats(&self) -> CacheStats {
        self.pipeline.cache().stats()
    }

    fn metrics_summary(&self) -> MetricsSummary {
        self.pipeline.metrics().summary()
    }
}
