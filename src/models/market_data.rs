//! Live market data for a token, as returned by the per-token pairs endpoint.

use serde::{Deserialize, Serialize};

/// Base token of a trading pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BaseToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

/// Buy/sell counts over one window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

impl TxnCounts {
    /// Total number of transactions.
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

/// Transaction counts per window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Txns {
    pub m5: Option<TxnCounts>,
    pub h1: Option<TxnCounts>,
    pub h6: Option<TxnCounts>,
    pub h24: Option<TxnCounts>,
}

/// A numeric figure per time window (volume, price change).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct WindowedFigures {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

/// Pool liquidity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

/// Extra presentation info attached to a pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PairInfo {
    pub image_url: Option<String>,
    pub header: Option<String>,
}

/// Market data for one token (the first pair upstream lists for it).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenMarketData {
    pub chain_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dex_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_address: Option<String>,

    pub base_token: BaseToken,

    /// Price as a decimal string, e.g. "0.00001234"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub txns: Option<Txns>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<WindowedFigures>,

    /// Price change percentages per window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<WindowedFigures>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Liquidity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdv: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<PairInfo>,
}

impl TokenMarketData {
    /// 24h volume in USD, 0 when absent.
    pub fn volume_24h(&self) -> f64 {
        self.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    /// Liquidity in USD, 0 when absent.
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }

    /// Buys plus sells over 24h, 0 when absent.
    pub fn transactions_24h(&self) -> u64 {
        self.txns
            .as_ref()
            .and_then(|t| t.h24)
            .map(|counts| counts.total())
            .unwrap_or(0)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.image_url.as_deref())
    }
}
