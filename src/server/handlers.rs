//! MCP tool handlers for the token screener.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::format_compact_usd;
use crate::services::TokenService;
use crate::tools::{ScreenFilters, SortBy, SortOrder};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes token screening tools.
#[derive(Clone)]
pub struct TokenScreenerServer {
    token_service: Arc<dyn TokenService>,
    default_page_size: usize,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for TokenScreenerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "token-screener-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for screening newly profiled tokens - lists tokens enriched with live market data, filters and sorts them, and shows per-token details.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetEnrichedTokensParams {
    /// 1-based page number (default 1)
    #[serde(default)]
    page: Option<usize>,
    /// Tokens per page (default from server configuration)
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ScreenTokensParams {
    /// Number of pages to load, starting at page 1 (default 1)
    #[serde(default)]
    pages: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    /// Case-insensitive substring of name or symbol
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    min_price: Option<f64>,
    #[serde(default)]
    max_price: Option<f64>,
    #[serde(default)]
    min_market_cap: Option<f64>,
    #[serde(default)]
    max_market_cap: Option<f64>,
    #[serde(default)]
    min_price_change: Option<f64>,
    #[serde(default)]
    max_price_change: Option<f64>,
    #[serde(default)]
    sort_by: Option<SortBy>,
    #[serde(default)]
    sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TokenAddressParams {
    token_address: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatAmountParams {
    amount: f64,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl TokenScreenerServer {
    /// Create a new token screener MCP server.
    pub fn new(token_service: Arc<dyn TokenService>, default_page_size: usize) -> Self {
        Self {
            token_service,
            default_page_size,
            tool_router: Self::tool_router(),
        }
    }

    /// List one page of tokens enriched with live market data.
    #[tool(
        description = "List one page of the latest token profiles enriched with live market data (price, market cap, volume, liquidity, 24h transactions, links). Page 1 always starts with the platform token. Returns an empty list when upstream is unavailable."
    )]
    async fn get_enriched_tokens(
        &self,
        params: Parameters<GetEnrichedTokensParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(self.default_page_size);

        let tokens = self.token_service.get_enriched_tokens(page, limit).await;

        json_result(&serde_json::json!({
            "page": page,
            "limit": limit,
            "count": tokens.len(),
            "tokens": tokens,
            "fetched_at": chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// Search, filter and sort enriched tokens.
    #[tool(
        description = "Search, filter and sort enriched tokens across the first N pages. Supports a name/symbol query, price, market cap and 24h price change bounds, and sorting by price, market_cap, price_change_24h or volume_24h."
    )]
    async fn screen_tokens(
        &self,
        params: Parameters<ScreenTokensParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let pages = params.pages.unwrap_or(1);
        let limit = params.limit.unwrap_or(self.default_page_size);

        let filters = ScreenFilters {
            query: params.query,
            min_price: params.min_price,
            max_price: params.max_price,
            min_market_cap: params.min_market_cap,
            max_market_cap: params.max_market_cap,
            min_price_change: params.min_price_change,
            max_price_change: params.max_price_change,
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
        };

        let tokens = self
            .token_service
            .screen_tokens(pages, limit, filters.clone())
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "filters": filters,
            "pages_loaded": pages,
            "count": tokens.len(),
            "tokens": tokens,
        }))
    }

    /// Retrieve one token by address.
    #[tool(
        description = "Retrieve live market data for a single token by address, in the same enriched format as the list"
    )]
    async fn get_token_details(
        &self,
        params: Parameters<TokenAddressParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let token = self
            .token_service
            .get_token_details(&params.token_address)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "token_address": params.token_address,
            "found": token.is_some(),
            "token": token,
        }))
    }

    #[tool(
        description = "Format a USD amount in compact form ($1.50B, $2.30M, $4.50K, $42.00), as used for market cap, volume and liquidity"
    )]
    async fn format_amount(
        &self,
        params: Parameters<FormatAmountParams>,
    ) -> Result<CallToolResult, McpError> {
        let amount = params.0.amount;

        json_result(&serde_json::json!({
            "amount": amount,
            "formatted": format_compact_usd(amount),
        }))
    }

    #[tool(description = "Drop every cached profile page, market data entry and enriched page")]
    async fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        self.token_service.clear_cache();

        json_result(&serde_json::json!({
            "cleared": true,
            "cache": self.token_service.cache_stats(),
        }))
    }

    #[tool(description = "Show cache hit/miss/set counters and upstream request metrics")]
    async fn get_cache_stats(&self) -> Result<CallToolResult, McpError> {
        json_result(&serde_json::json!({
            "cache": self.token_service.cache_stats(),
            "metrics": self.token_service.metrics_summary(),
        }))
    }
}
