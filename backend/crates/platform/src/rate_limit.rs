//! Rate Limiting Infrastructure
//!
//! Fixed-window counting policy. The counter itself lives in whatever store
//! the caller uses; this module only decides what a given count means.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    /// Judge a counter value that already includes the current request.
    ///
    /// Counts past the limit stay rejected; the caller is expected to have
    /// incremented unconditionally, so a blocked key remains blocked until
    /// its window expires.
    pub fn evaluate(&self, count: u64) -> RateLimitResult {
        let max = u64::from(self.max_requests);
        RateLimitResult {
            allowed: count <= max,
            count,
            remaining: max.saturating_sub(count),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub count: u64,
    pub remaining: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_boundary() {
        let config = RateLimitConfig::new(3, 600);

        assert!(config.evaluate(1).allowed);
        assert!(config.evaluate(3).allowed);
        assert_eq!(config.evaluate(3).remaining, 0);

        let blocked = config.evaluate(4);
        assert!(!blocked.allowed);
        assert_eq!(blocked.remaining, 0);
        assert!(!config.evaluate(40).allowed);
    }

    #[test]
    fn test_window_secs() {
        assert_eq!(RateLimitConfig::new(3, 600).window_secs(), 600);
        assert_eq!(RateLimitConfig::new(10, 60).window_secs(), 60);
    }
}
