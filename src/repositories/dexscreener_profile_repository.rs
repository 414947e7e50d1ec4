use crate::client::AsyncScreenerClient;
use crate::error::ScreenerApiResult;
use crate::models::TokenProfile;
use crate::repositories::traits::ProfileRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Profile repository backed by the latest-profiles endpoint.
///
/// Upstream returns the whole list in one response, so paging is applied
/// in-memory after every fetch.
pub struct DexScreenerProfileRepository {
    client: Arc<dyn AsyncScreenerClient>,
}

impl DexScreenerProfileRepository {
    pub fn new(client: Arc<dyn AsyncScreenerClient>) -> Self {
        Self { client }
    }
}

/// Slice `[(page-1)*limit, (page-1)*limit + limit)` out of `items`.
pub(crate) fn slice_page<T>(mut items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let offset = page.max(1).saturating_sub(1).saturating_mul(limit);

    if offset >= items.len() {
        return Vec::new();
    }

    items.drain(..offset);
    items.truncate(limit);
    items
}

#[async_trait]
impl ProfileRepository for DexScreenerProfileRepository {
    async fn latest_page(&self, page: usize, limit: usize) -> ScreenerApiResult<Vec<TokenProfile>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let profiles = self.client.get_latest_profiles().await?;
        tracing::debug!(
            "Fetched {} profiles, slicing page {} (limit {})",
            profiles.len(),
            page,
            limit
        );

        Ok(slice_page(profiles, page, limit))
    }
}
