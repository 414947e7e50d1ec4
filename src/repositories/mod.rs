mod dexscreener_market_data_repository;
mod dexscreener_profile_repository;
mod traits;

pub use dexscreener_market_data_repository::DexScreenerMarketDataRepository;
pub use dexscreener_profile_repository::DexScreenerProfileRepository;
pub use traits::{MarketDataRepository, ProfileRepository};
