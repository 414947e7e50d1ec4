//! Token enrichment pipeline.
//!
//! Merges latest token profiles with live market data, page by page. Profile
//! pages, per-token market data and finished pages are cached independently,
//! each with its own TTL. Market-data fetches run in fixed-size batches:
//! all fetches of a batch are in flight together, and the next batch starts
//! only after the previous one has fully completed.

use crate::cache::{CachedPayload, ScreenerCache};
use crate::config::Config;
use crate::domain::{format_compact_usd, format_price};
use crate::error::{PipelineError, PipelineResult};
use crate::metrics::Metrics;
use crate::models::{
    PriceChangeBreakdown, ProfileLinks, Token, TokenLinks, TokenMarketData, TokenProfile,
};
use crate::repositories::{MarketDataRepository, ProfileRepository};
use futures::future::join_all;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

/// Address of the platform's own token, injected first on page 1.
pub const PLATFORM_TOKEN_ADDRESS: &str = "Ey59PH7Z4BFU4HjyKnyMdWt5GGN76KazTAwQihoUXRnk";
pub const PLATFORM_TOKEN_DESCRIPTION: &str =
    "The official Belive Launch Coin - powering the future of token launches";
pub const PLATFORM_TOKEN_CHAIN_ID: &str = "solana";
pub const PLATFORM_TOKEN_NAME: &str = "LAUNCHCOIN";
pub const PLATFORM_TOKEN_SYMBOL: &str = "Launch Coin on Believe";
pub const PLATFORM_WEBSITE: &str = "https://believe.app";
pub const PLATFORM_TWITTER: &str = "https://twitter.com/belive";
pub const PLATFORM_TELEGRAM: &str = "https://t.me/belive";

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_PROFILES_TTL: Duration = Duration::from_secs(120);
pub const DEFAULT_MARKET_DATA_TTL: Duration = Duration::from_secs(30);
pub const DEFAULT_ENRICHED_TTL: Duration = Duration::from_secs(60);

const UNKNOWN_NAME: &str = "Unknown Token";
const UNKNOWN_SYMBOL: &str = "UNKNOWN";

static PLATFORM_PROFILE: Lazy<TokenProfile> = Lazy::new(|| TokenProfile {
    description: Some(PLATFORM_TOKEN_DESCRIPTION.to_string()),
    ..TokenProfile::new(PLATFORM_TOKEN_ADDRESS, PLATFORM_TOKEN_CHAIN_ID)
});

/// The synthetic profile injected at the head of page 1.
pub fn platform_profile() -> TokenProfile {
    PLATFORM_PROFILE.clone()
}

pub fn enriched_key(page: usize, limit: usize) -> String {
    format!("enriched:{}:{}", page, limit)
}

pub fn profiles_key(page: usize, limit: usize) -> String {
    format!("profiles:{}:{}", page, limit)
}

pub fn market_key(token_address: &str) -> String {
    format!("market:{}", token_address)
}

/// Tunables for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Market-data fetches in flight per batch
    pub batch_size: usize,
    pub profiles_ttl: Duration,
    pub market_data_ttl: Duration,
    pub enriched_ttl: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            profiles_ttl: DEFAULT_PROFILES_TTL,
            market_data_ttl: DEFAULT_MARKET_DATA_TTL,
            enriched_ttl: DEFAULT_ENRICHED_TTL,
        }
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            batch_size: config.enrichment_batch_size.max(1),
            profiles_ttl: config.profile_cache_ttl(),
            market_data_ttl: config.market_data_cache_ttl(),
            enriched_ttl: config.enriched_cache_ttl(),
        }
    }
}

/// Normalize raw profile links into website/twitter/telegram.
///
/// For the sequence form every entry is scanned and a later match overwrites
/// an earlier one in the same category. The keyed form is copied as is.
pub fn normalize_links(links: Option<&ProfileLinks>) -> TokenLinks {
    match links {
        None => TokenLinks::default(),
        Some(ProfileLinks::Keyed(keyed)) => TokenLinks {
            website: keyed.website.clone(),
            twitter: keyed.twitter.clone(),
            telegram: keyed.telegram.clone(),
        },
        Some(ProfileLinks::Sequence(entries)) => {
            let mut normalized = TokenLinks::default();

            for entry in entries {
                let label = entry.label.as_deref().unwrap_or_default().to_lowercase();
                let kind = entry.link_type.as_deref().unwrap_or_default().to_lowercase();

                if label.contains("website") || kind.contains("website") {
                    normalized.website = entry.url.clone();
                }
                if is_twitter(&label) || is_twitter(&kind) {
                    normalized.twitter = entry.url.clone();
                }
                if label == "telegram" || kind == "telegram" {
                    normalized.telegram = entry.url.clone();
                }
            }

            normalized
        }
    }
}

fn is_twitter(tag: &str) -> bool {
    tag == "twitter" || tag == "x"
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Merge a profile and its market data into an enriched token.
///
/// Does not apply the platform override; see [`apply_platform_override`].
pub fn build_token(profile: &TokenProfile, market: &TokenMarketData) -> Token {
    let change = market.price_change.clone().unwrap_or_default();

    Token {
        token_address: profile.token_address.clone(),
        name: non_empty(Some(market.base_token.symbol.as_str()))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        symbol: non_empty(Some(market.base_token.name.as_str()))
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
        price: format_price(market.price_usd.as_deref()),
        price_change_24h: change.h24.unwrap_or(0.0),
        market_cap: format_compact_usd(market.market_cap.unwrap_or(0.0)),
        volume_24h: market.volume_24h(),
        liquidity: market.liquidity_usd(),
        transactions_24h: market.transactions_24h(),
        icon: non_empty(market.image_url()).or_else(|| non_empty(profile.icon.as_deref())),
        description: profile.best_description(),
        links: normalize_links(profile.links.as_ref()),
        price_change: PriceChangeBreakdown {
            m5: change.m5.unwrap_or(0.0),
            h1: change.h1.unwrap_or(0.0),
            h6: change.h6.unwrap_or(0.0),
            h24: change.h24.unwrap_or(0.0),
        },
    }
}

/// Overwrite branding fields when the token is the platform token.
pub fn apply_platform_override(token: &mut Token) {
    if token.token_address != PLATFORM_TOKEN_ADDRESS {
        return;
    }

    token.name = PLATFORM_TOKEN_NAME.to_string();
    token.symbol = PLATFORM_TOKEN_SYMBOL.to_string();
    token.links = TokenLinks {
        website: Some(PLATFORM_WEBSITE.to_string()),
        twitter: Some(PLATFORM_TWITTER.to_string()),
        telegram: Some(PLATFORM_TELEGRAM.to_string()),
    };
}

/// Profile list for a page, plus whether it came back degraded.
struct ResolvedProfiles {
    profiles: Vec<TokenProfile>,
    degraded: bool,
}

/// The enrichment pipeline.
///
/// Cheap to clone; clones share repositories, cache and metrics.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    profiles: Arc<dyn ProfileRepository>,
    market_data: Arc<dyn MarketDataRepository>,
    cache: ScreenerCache,
    metrics: Metrics,
    settings: PipelineSettings,
}

impl EnrichmentPipeline {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        market_data: Arc<dyn MarketDataRepository>,
        cache: ScreenerCache,
        metrics: Metrics,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            profiles,
            market_data,
            cache,
            metrics,
            settings: PipelineSettings {
                batch_size: settings.batch_size.max(1),
                ..settings
            },
        }
    }

    pub fn cache(&self) -> &ScreenerCache {
        &self.cache
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Enriched tokens for one page.
    ///
    /// Page 1 always starts with the platform token (when its market data is
    /// available) followed by `limit - 1` regular profiles. Profiles without
    /// market data are dropped. Output order follows profile order and never
    /// exceeds `limit` tokens.
    pub async fn enrich_page(&self, page: usize, limit: usize) -> PipelineResult<Vec<Token>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let page = page.max(1);
        let key = enriched_key(page, limit);

        if let Some(CachedPayload::Tokens(tokens)) = self.cache.get(&key) {
            tracing::trace!("Enriched page cache hit: {}", key);
            return Ok(tokens);
        }

        let resolved = self.resolve_profiles(page, limit).await;
        let requested = resolved.profiles.len();

        let mut tokens = Vec::with_capacity(requested);
        for batch in resolved.profiles.chunks(self.settings.batch_size) {
            tokens.extend(self.enrich_batch(batch).await?);
        }

        let dropped = requested - tokens.len();
        self.metrics.record_enrichment(tokens.len(), dropped);
        tracing::debug!(
            "Enriched page {} (limit {}): {} tokens, {} dropped",
            page,
            limit,
            tokens.len(),
            dropped
        );

        if resolved.degraded {
            tracing::debug!("Profile fetch failed, not caching {}", key);
        } else {
            self.cache.set(
                key,
                CachedPayload::Tokens(tokens.clone()),
                self.settings.enriched_ttl,
            );
        }

        Ok(tokens)
    }

    /// Enriched token for a single address, or `None` without market data.
    pub async fn get_token(&self, token_address: &str) -> PipelineResult<Option<Token>> {
        let profile = if token_address == PLATFORM_TOKEN_ADDRESS {
            platform_profile()
        } else {
            TokenProfile::new(token_address, PLATFORM_TOKEN_CHAIN_ID)
        };

        let mut results = self.enrich_batch(std::slice::from_ref(&profile)).await?;
        Ok(results.pop())
    }

    async fn resolve_profiles(&self, page: usize, limit: usize) -> ResolvedProfiles {
        if page == 1 {
            let mut profiles = vec![platform_profile()];
            let extra = limit.saturating_sub(1);
            if extra == 0 {
                return ResolvedProfiles {
                    profiles,
                    degraded: false,
                };
            }

            let (fetched, degraded) = self.fetch_profiles(1, extra).await;
            profiles.extend(fetched);
            ResolvedProfiles { profiles, degraded }
        } else {
            let (profiles, degraded) = self.fetch_profiles(page, limit).await;
            ResolvedProfiles { profiles, degraded }
        }
    }

    /// Cache-checked profile fetch. Errors become an empty page and are not cached.
    async fn fetch_profiles(&self, page: usize, limit: usize) -> (Vec<TokenProfile>, bool) {
        let key = profiles_key(page, limit);

        if let Some(CachedPayload::Profiles(profiles)) = self.cache.get(&key) {
            tracing::trace!("Profile page cache hit: {}", key);
            return (profiles, false);
        }

        match self.profiles.latest_page(page, limit).await {
            Ok(profiles) => {
                self.cache.set(
                    key,
                    CachedPayload::Profiles(profiles.clone()),
                    self.settings.profiles_ttl,
                );
                (profiles, false)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch token profiles (page {}): {}", page, e);
                (Vec::new(), true)
            }
        }
    }

    /// Enrich one batch with all market-data fetches in flight at once.
    async fn enrich_batch(&self, batch: &[TokenProfile]) -> PipelineResult<Vec<Token>> {
        let handles = batch.iter().map(|profile| {
            let profile = profile.clone();
            let market_data = self.market_data.clone();
            let cache = self.cache.clone();
            let metrics = self.metrics.clone();
            let ttl = self.settings.market_data_ttl;

            tokio::spawn(async move {
                let market = fetch_market_data(market_data, cache, metrics, ttl, &profile.token_address)
                    .await?;
                let mut token = build_token(&profile, &market);
                apply_platform_override(&mut token);
                Some(token)
            })
        });

        // join_all yields results in spawn order, not completion order
        let mut tokens = Vec::with_capacity(batch.len());
        for joined in join_all(handles).await {
            let token = joined.map_err(|e| PipelineError::TaskFailed(e.to_string()))?;
            tokens.extend(token);
        }

        Ok(tokens)
    }
}

/// Cache-checked market-data fetch. Absent data and errors are not cached.
async fn fetch_market_data(
    repository: Arc<dyn MarketDataRepository>,
    cache: ScreenerCache,
    metrics: Metrics,
    ttl: Duration,
    token_address: &str,
) -> Option<TokenMarketData> {
    let key = market_key(token_address);

    if let Some(CachedPayload::MarketData(data)) = cache.get(&key) {
        tracing::trace!("Market data cache hit: {}", key);
        return Some(data);
    }

    match repository.get_market_data(token_address).await {
        Ok(Some(data)) => {
            metrics.record_market_data_fetched();
            cache.set(key, CachedPayload::MarketData(data.clone()), ttl);
            Some(data)
        }
        Ok(None) => {
            tracing::debug!("No market data for {}", token_address);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to fetch market data for {}: {}", token_address, e);
            None
        }
    }
}
