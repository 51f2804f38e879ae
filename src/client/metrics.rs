//! Client Metrics Module
//!
//! Tracks how the client's loads were served and how many requests it issued.

use serde::Serialize;

// == Client Metrics ==
/// Cache and request counters for one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClientMetrics {
    /// Loads served from a fresh snapshot
    pub cache_hits: u64,
    /// Loads that had to fetch from the service
    pub cache_misses: u64,
    /// Requests issued to the service, successful or not
    pub api_calls: u64,
}

impl ClientMetrics {
    // == Constructor ==
    /// Creates a new ClientMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if nothing has been loaded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.cache_misses += 1;
    }

    pub fn record_api_call(&mut self) {
        self.api_calls += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = ClientMetrics::new();
        assert_eq!(metrics, ClientMetrics::default());
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut metrics = ClientMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        assert_eq!(metrics.hit_rate(), 0.75);
    }

    #[test]
    fn test_api_calls_independent_of_hits() {
        let mut metrics = ClientMetrics::new();
        metrics.record_api_call();
        metrics.record_api_call();
        assert_eq!(metrics.api_calls, 2);
        assert_eq!(metrics.cache_hits + metrics.cache_misses, 0);
    }
}
