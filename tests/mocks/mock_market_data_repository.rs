use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use token_screener_mcp::error::{ScreenerApiError, ScreenerApiResult};
use token_screener_mcp::models::TokenMarketData;
use token_screener_mcp::repositories::MarketDataRepository;

/// Mock market data repository for testing.
///
/// Addresses without registered data return `None`. Failing addresses return
/// an error. An optional delay keeps fetches in flight long enough to measure
/// concurrency.
#[derive(Clone, Default)]
pub struct MockMarketDataRepository {
    data: Arc<Mutex<HashMap<String, TokenMarketData>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockMarketDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_market_data(&self, address: &str, data: TokenMarketData) {
        self.data.lock().unwrap().insert(address.to_string(), data);
    }

    pub fn add_failure(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of fetches for one address.
    pub fn get_call_count(&self, address: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(address).unwrap_or(&0)
    }

    /// Number of fetches across all addresses.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    /// Highest number of fetches observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn track_call(&self, address: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(address.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl MarketDataRepository for MockMarketDataRepository {
    async fn get_market_data(
        &self,
        token_address: &str,
    ) -> ScreenerApiResult<Option<TokenMarketData>> {
        self.track_call(token_address);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(token_address) {
            return Err(ScreenerApiError::Timeout);
        }

        Ok(self.data.lock().unwrap().get(token_address).cloned())
    }
}
