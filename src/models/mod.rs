//! Data models for screener entities.
//!
//! This module contains the upstream token profile and market-data records and
//! the enriched token built from them.

pub mod market_data;
pub mod profile;
pub mod token;

pub use market_data::{BaseToken, Liquidity, PairInfo, TokenMarketData, TxnCounts, Txns, WindowedFigures};
pub use profile::{KeyedLinks, OpenGraph, ProfileLink, ProfileLinks, TokenProfile};
pub use token::{PriceChangeBreakdown, Token, TokenLinks};
