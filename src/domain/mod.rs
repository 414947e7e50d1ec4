//! Domain value objects and formatting rules.
//!
//! This module contains the type-safe token address wrapper and the USD
//! formatting helpers shared by the enrichment pipeline, screening and the
//! MCP surface.

pub mod errors;
pub mod token_address;
pub mod usd_amount;

pub use errors::ValidationError;
pub use token_address::TokenAddress;
pub use usd_amount::{format_compact_usd, format_price, parse_compact_usd, parse_price, MISSING_PRICE};
