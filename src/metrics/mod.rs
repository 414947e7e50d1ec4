//! Lightweight counters for upstream traffic and enrichment outcomes.
//!
//! The HTTP client records request counts, latencies and rate-limit hits; the
//! enrichment pipeline records how many profiles turned into tokens. Counters
//! only ever grow for the lifetime of the process.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    request_errors: AtomicU64,
    rate_limited: AtomicU64,
    request_ms: AtomicU64,
    profiles_fetched: AtomicU64,
    market_data_fetched: AtomicU64,
    tokens_enriched: AtomicU64,
    tokens_dropped: AtomicU64,
}

fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

/// Shared metrics handle. Clones observe the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

/// How an upstream request ended, as seen by [`RequestTimer::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    RateLimited,
    Failed,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished upstream request.
    pub fn record_request(&self, elapsed: Duration, outcome: RequestOutcome) {
        let c = &self.counters;
        bump(&c.requests, 1);
        bump(&c.request_ms, elapsed.as_millis() as u64);

        match outcome {
            RequestOutcome::Success => {}
            RequestOutcome::RateLimited => {
                bump(&c.request_errors, 1);
                bump(&c.rate_limited, 1);
            }
            RequestOutcome::Failed => bump(&c.request_errors, 1),
        }
    }

    pub fn record_profiles_fetched(&self, count: usize) {
        bump(&self.counters.profiles_fetched, count as u64);
    }

    pub fn record_market_data_fetched(&self) {
        bump(&self.counters.market_data_fetched, 1);
    }

    /// Record the outcome of enriching one page.
    pub fn record_enrichment(&self, produced: usize, dropped: usize) {
        bump(&self.counters.tokens_enriched, produced as u64);
        bump(&self.counters.tokens_dropped, dropped as u64);
    }

    pub fn http_requests_total(&self) -> u64 {
        read(&self.counters.requests)
    }

    pub fn http_errors_total(&self) -> u64 {
        read(&self.counters.request_errors)
    }

    /// Requests upstream answered with 429.
    pub fn rate_limited_total(&self) -> u64 {
        read(&self.counters.rate_limited)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        read(&self.counters.request_ms)
    }

    pub fn profiles_fetched_total(&self) -> u64 {
        read(&self.counters.profiles_fetched)
    }

    pub fn market_data_fetched_total(&self) -> u64 {
        read(&self.counters.market_data_fetched)
    }

    pub fn tokens_enriched_total(&self) -> u64 {
        read(&self.counters.tokens_enriched)
    }

    pub fn tokens_dropped_total(&self) -> u64 {
        read(&self.counters.tokens_dropped)
    }

    pub fn summary(&self) -> MetricsSummary {
        let requests = self.http_requests_total();
        let total_ms = self.http_duration_total_ms();

        MetricsSummary {
            http_requests_total: requests,
            http_errors_total: self.http_errors_total(),
            rate_limited_total: self.rate_limited_total(),
            http_duration_total_ms: total_ms,
            http_duration_avg_ms: if requests == 0 {
                0.0
            } else {
                total_ms as f64 / requests as f64
            },
            profiles_fetched_total: self.profiles_fetched_total(),
            market_data_fetched_total: self.market_data_fetched_total(),
            tokens_enriched_total: self.tokens_enriched_total(),
            tokens_dropped_total: self.tokens_dropped_total(),
        }
    }
}

/// Point-in-time view of the counters, as reported by the stats tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub rate_limited_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub profiles_fetched_total: u64,
    pub market_data_fetched_total: u64,
    pub tokens_enriched_total: u64,
    pub tokens_dropped_total: u64,
}

/// Times one upstream request from creation until [`finish`](Self::finish).
pub struct RequestTimer {
    started: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    pub fn start(metrics: &Metrics) -> Self {
        Self {
            started: Instant::now(),
            metrics: metrics.clone(),
        }
    }

    pub fn finish(self, outcome: RequestOutcome) {
        self.metrics
            .record_request(self.started.elapsed(), outcome);
    }
}
