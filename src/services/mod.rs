//! Application service layer.
//!
//! Services contain business logic and orchestrate the enrichment pipeline
//! and screening. They provide a clean boundary between the MCP handlers and
//! the data access layer.

mod token_service;

pub use token_service::{
    format_liquidity, format_market_cap, format_volume, TokenService, TokenServiceImpl,
    MAX_PAGE_SIZE, MAX_SCREEN_PAGES,
};
