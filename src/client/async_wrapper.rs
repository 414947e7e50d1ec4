//! Async wrapper around synchronous ScreenerClient.
//!
//! This module provides an async interface to the synchronous ScreenerClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::ScreenerClient;
use crate::error::{ScreenerApiError, ScreenerApiResult};
use crate::models::{TokenMarketData, TokenProfile};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for upstream client operations.
#[async_trait]
pub trait AsyncScreenerClient: Send + Sync {
    async fn get_latest_profiles(&self) -> ScreenerApiResult<Vec<TokenProfile>>;

    async fn get_token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> ScreenerApiResult<Vec<TokenMarketData>>;
}

/// Async wrapper around synchronous ScreenerClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncScreenerClientImpl {
    client: Arc<ScreenerClient>,
}

impl AsyncScreenerClientImpl {
    pub fn new(client: ScreenerClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncScreenerClient for AsyncScreenerClientImpl {
    async fn get_latest_profiles(&self) -> ScreenerApiResult<Vec<TokenProfile>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_latest_profiles())
            .await
            .map_err(|e| ScreenerApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn get_token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> ScreenerApiResult<Vec<TokenMarketData>> {
        let client = self.client.clone();
        let chain_id = chain_id.to_string();
        let token_address = token_address.to_string();

        tokio::task::spawn_blocking(move || client.get_token_pairs(&chain_id, &token_address))
            .await
            .map_err(|e| ScreenerApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
