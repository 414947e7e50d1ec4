//! In-memory repositories and fixtures shared by the integration tests.

#![allow(dead_code)]

mod mock_market_data_repository;
mod mock_profile_repository;

pub use mock_market_data_repository::MockMarketDataRepository;
pub use mock_profile_repository::MockProfileRepository;

use token_screener_mcp::models::{
    BaseToken, Liquidity, PairInfo, TokenMarketData, TokenProfile, TxnCounts, Txns,
    WindowedFigures,
};

/// A minimal profile on solana.
pub fn sample_profile(address: &str) -> TokenProfile {
    TokenProfile::new(address, "solana")
}

/// Market data with every section populated.
pub fn sample_market_data(address: &str, symbol: &str, name: &str) -> TokenMarketData {
    TokenMarketData {
        chain_id: "solana".to_string(),
        dex_id: Some("raydium".to_string()),
        pair_address: Some(format!("{}-pair", address)),
        base_token: BaseToken {
            address: address.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        },
        price_usd: Some("0.0025".to_string()),
        txns: Some(Txns {
            h24: Some(TxnCounts { buys: 30, sells: 12 }),
            ..Default::default()
        }),
        volume: Some(WindowedFigures {
            h24: Some(125_000.0),
            ..Default::default()
        }),
        price_change: Some(WindowedFigures {
            m5: Some(0.4),
            h1: Some(1.2),
            h6: Some(-2.0),
            h24: Some(8.5),
        }),
        liquidity: Some(Liquidity {
            usd: Some(64_000.0),
            ..Default::default()
        }),
        fdv: Some(2_500_000.0),
        market_cap: Some(2_300_000.0),
        info: Some(PairInfo {
            image_url: Some(format!("https://cdn.example/{}.png", address)),
            header: None,
        }),
    }
}
