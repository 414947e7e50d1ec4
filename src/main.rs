//! Token Screener MCP Server - Main entry point
//!
//! Serves enriched token listings and screening over the Model Context
//! Protocol on stdio.

use anyhow::Result;
use std::sync::Arc;
use token_screener_mcp::cache::ScreenerCache;
use token_screener_mcp::client::{AsyncScreenerClient, AsyncScreenerClientImpl};
use token_screener_mcp::repositories::{
    DexScreenerMarketDataRepository, DexScreenerProfileRepository, MarketDataRepository,
    ProfileRepository,
};
use token_screener_mcp::services::{TokenService, TokenServiceImpl};
use token_screener_mcp::tools::{EnrichmentPipeline, PipelineSettings};
use token_screener_mcp::{Config, Metrics, ScreenerClient, TokenScreenerServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Token Screener MCP Server with API URL: {} (chain: {})",
        config.api_base_url, config.chain_id
    );

    let metrics = Metrics::new();
    let sync_client = ScreenerClient::with_metrics(&config, metrics.clone());
    let client =
        Arc::new(AsyncScreenerClientImpl::new(sync_client)) as Arc<dyn AsyncScreenerClient>;

    let profile_repo =
        Arc::new(DexScreenerProfileRepository::new(client.clone())) as Arc<dyn ProfileRepository>;
    let market_repo = Arc::new(DexScreenerMarketDataRepository::new(
        client,
        config.chain_id.clone(),
    )) as Arc<dyn MarketDataRepository>;

    let settings = PipelineSettings::from(&config);
    let pipeline = EnrichmentPipeline::new(
        profile_repo,
        market_repo,
        ScreenerCache::new(),
        metrics,
        settings,
    );

    let token_service = Arc::new(TokenServiceImpl::new(pipeline)) as Arc<dyn TokenService>;
    let server = TokenScreenerServer::new(token_service, config.default_page_size);

    info!(
        "Cache TTLs: profiles {}s, market data {}s, enriched pages {}s; batch size {}",
        config.profile_cache_ttl_secs,
        config.market_data_cache_ttl_secs,
        config.enriched_cache_ttl_secs,
        settings.batch_size
    );

    info!("Starting MCP server with stdio transport");
    token_screener_mcp::server::run_server(server).await?;

    info!("Token Screener MCP Server shutdown complete");
    Ok(())
}
