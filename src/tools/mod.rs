//! Token processing tools.
//!
//! This module provides two building blocks used by the service layer:
//! - **Enrichment**: merge profiles with live market data, batched and cached
//! - **Screening**: search, filter and sort enriched tokens

pub mod enrichment;
pub mod screening;

pub use enrichment::{
    apply_platform_override, build_token, normalize_links, platform_profile, EnrichmentPipeline,
    PipelineSettings, PLATFORM_TOKEN_ADDRESS,
};
pub use screening::{screen_tokens, ScreenFilters, SortBy, SortOrder};
