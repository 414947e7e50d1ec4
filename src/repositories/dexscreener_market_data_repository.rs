use crate::client::AsyncScreenerClient;
use crate::error::ScreenerApiResult;
use crate::models::TokenMarketData;
use crate::repositories::traits::MarketDataRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Market data repository backed by the per-token pairs endpoint.
///
/// Only the first pair upstream lists is used.
pub struct DexScreenerMarketDataRepository {
    client: Arc<dyn AsyncScreenerClient>,
    chain_id: String,
}

impl DexScreenerMarketDataRepository {
    pub fn new(client: Arc<dyn AsyncScreenerClient>, chain_id: impl Into<String>) -> Self {
        Self {
            client,
            chain_id: chain_id.into(),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }
}

#[async_trait]
impl MarketDataRepository for DexScreenerMarketDataRepository {
    async fn get_market_data(
        &self,
        token_address: &str,
    ) -> ScreenerApiResult<Option<TokenMarketData>> {
        let pairs = self
            .client
            .get_token_pairs(&self.chain_id, token_address)
            .await?;

        Ok(pairs.into_iter().next())
    }
}
