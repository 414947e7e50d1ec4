//! Enriched token: the merged, caller-facing record.

use serde::{Deserialize, Serialize};

/// Normalized website/twitter/telegram links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TokenLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

/// Price change percentages per window; missing windows are 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PriceChangeBreakdown {
    pub m5: f64,
    pub h1: f64,
    pub h6: f64,
    pub h24: f64,
}

/// A token profile merged with its live market data.
///
/// Constructed fresh by the enrichment pipeline and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// On-chain address (identity)
    pub token_address: String,

    /// Display name
    pub name: String,

    /// Secondary label
    pub symbol: String,

    /// Pre-formatted price, e.g. "$0.0012340000"
    pub price: String,

    /// 24h price change in percent
    pub price_change_24h: f64,

    /// Pre-formatted market cap, e.g. "$1.23M"
    pub market_cap: String,

    /// 24h volume in USD
    pub volume_24h: f64,

    /// Liquidity in USD
    pub liquidity: f64,

    /// Buys plus sells over 24h
    pub transactions_24h: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub links: TokenLinks,

    #[serde(default)]
    pub price_change: PriceChangeBreakdown,
}
