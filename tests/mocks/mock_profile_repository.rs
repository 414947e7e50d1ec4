use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use token_screener_mcp::error::{ScreenerApiError, ScreenerApiResult};
use token_screener_mcp::models::TokenProfile;
use token_screener_mcp::repositories::ProfileRepository;

/// Mock profile repository for testing.
///
/// Holds an ordered in-memory "latest" list, pages it the same way the real
/// repository does and tracks calls for verification.
#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<Vec<TokenProfile>>>,
    fail: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    requests: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository preloaded with profiles.
    pub fn with_profiles(profiles: Vec<TokenProfile>) -> Self {
        let repo = Self::new();
        repo.set_profiles(profiles);
        repo
    }

    pub fn set_profiles(&self, profiles: Vec<TokenProfile>) {
        *self.profiles.lock().unwrap() = profiles;
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// The `(page, limit)` pairs requested so far, in call order.
    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn latest_page(&self, page: usize, limit: usize) -> ScreenerApiResult<Vec<TokenProfile>> {
        self.track_call("latest_page");
        self.requests.lock().unwrap().push((page, limit));

        if *self.fail.lock().unwrap() {
            return Err(ScreenerApiError::ApiError {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        let profiles = self.profiles.lock().unwrap();
        let offset = page.max(1).saturating_sub(1) * limit;
        Ok(profiles.iter().skip(offset).take(limit).cloned().collect())
    }
}
