//! Search, filter and sort over enriched tokens.
//!
//! Works on already formatted tokens: price and market cap are parsed back
//! out of their display strings before comparison.

use crate::domain::{parse_compact_usd, parse_price};
use crate::models::Token;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key for screening results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Price,
    #[default]
    MarketCap,
    #[serde(rename = "price_change_24h")]
    PriceChange24h,
    #[serde(rename = "volume_24h")]
    Volume24h,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters applied by [`screen_tokens`]. Unset bounds do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScreenFilters {
    /// Case-insensitive substring matched against name and symbol
    pub query: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_market_cap: Option<f64>,
    pub max_market_cap: Option<f64>,
    /// Bounds on the 24h price change, in percent
    pub min_price_change: Option<f64>,
    pub max_price_change: Option<f64>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl ScreenFilters {
    fn matches(&self, token: &Token, query: Option<&str>) -> bool {
        if let Some(query) = query {
            let name = token.name.to_lowercase();
            let symbol = token.symbol.to_lowercase();
            if !name.contains(query) && !symbol.contains(query) {
                return false;
            }
        }

        let price = parse_price(&token.price).unwrap_or(0.0);
        let market_cap = parse_compact_usd(&token.market_cap).unwrap_or(0.0);

        within(price, self.min_price, self.max_price)
            && within(market_cap, self.min_market_cap, self.max_market_cap)
            && within(
                token.price_change_24h,
                self.min_price_change,
                self.max_price_change,
            )
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

fn sort_value(token: &Token, sort_by: SortBy) -> f64 {
    match sort_by {
        SortBy::Price => parse_price(&token.price).unwrap_or(0.0),
        SortBy::MarketCap => parse_compact_usd(&token.market_cap).unwrap_or(0.0),
        SortBy::PriceChange24h => token.price_change_24h,
        SortBy::Volume24h => token.volume_24h,
    }
}

/// Filter and sort tokens. The sort is stable, so ties keep input order.
pub fn screen_tokens(tokens: &[Token], filters: &ScreenFilters) -> Vec<Token> {
    let query = filters
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut keyed: Vec<(f64, &Token)> = tokens
        .iter()
        .filter(|token| filters.matches(token, query.as_deref()))
        .map(|token| (sort_value(token, filters.sort_by), token))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match filters.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, token)| token.clone()).collect()
}
