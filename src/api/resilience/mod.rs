//! Rate limiting for Slack Web API calls
//!
//! Slack assigns every Web API method a rate-limit tier. Each tier gets one
//! token-bucket limiter, shared by every task that calls a method of that tier.

pub mod config;
pub mod rate_limiter;

pub use config::{RateLimitConfig, Tier};
pub use rate_limiter::{RateLimiter, RateLimiterStats};

use std::collections::HashMap;

/// One rate limiter per Slack tier
#[derive(Debug, Clone)]
pub struct RateLimiters {
    limiters: HashMap<Tier, RateLimiter>,
}

impl RateLimiters {
    /// Limiters using Slack's published per-tier limits
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::for_tier)
    }

    /// Limiters that never wait (for tests and local servers)
    pub fn disabled() -> Self {
        Self::with_config(|_| RateLimitConfig::disabled())
    }

    /// Build limiters from a per-tier configuration function
    pub fn with_config(config_for: impl Fn(Tier) -> RateLimitConfig) -> Self {
        let limiters = Tier::ALL
            .iter()
            .map(|&tier| (tier, RateLimiter::new(config_for(tier))))
            .collect();
        Self { limiters }
    }

    /// Limiter for the given tier
    pub fn get(&self, tier: Tier) -> &RateLimiter {
        // with_config fills every tier
        &self.limiters[&tier]
    }

    /// Statistics for every tier that has seen traffic
    pub fn stats(&self) -> Vec<(Tier, RateLimiterStats)> {
        let mut stats: Vec<_> = self
            .limiters
            .iter()
            .map(|(tier, limiter)| (*tier, limiter.stats()))
            .filter(|(_, stats)| stats.requests_made > 0)
            .collect();
        stats.sort_by_key(|(tier, _)| *tier);
        stats
    }
}

impl Default for RateLimiters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_has_a_limiter() {
        let limiters = RateLimiters::new();
        for tier in Tier::ALL {
            let stats = limiters.get(tier).stats();
            assert!(stats.enabled);
            assert_eq!(stats.requests_per_minute, tier.requests_per_minute());
        }
    }

    #[test]
    fn test_clones_share_buckets() {
        let limiters = RateLimiters::new();
        let clone = limiters.clone();

        assert!(limiters.get(Tier::Tier3).try_acquire());
        assert!(!clone.get(Tier::Tier3).try_acquire());
    }

    #[test]
    fn test_stats_only_reports_used_tiers() {
        let limiters = RateLimiters::disabled();
        limiters.get(Tier::Tier2).try_acquire();

        let stats = limiters.stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].0, Tier::Tier2);
    }
}
