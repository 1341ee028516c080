//! Rate limit configuration for Slack's method tiers

/// Slack Web API rate-limit tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Tier1, Tier::Tier2, Tier::Tier3, Tier::Tier4];

    /// Published per-method limit for the tier
    pub fn requests_per_minute(self) -> u32 {
        match self {
            Tier::Tier1 => 1,
            Tier::Tier2 => 20,
            Tier::Tier3 => 50,
            Tier::Tier4 => 100,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = match self {
            Tier::Tier1 => 1,
            Tier::Tier2 => 2,
            Tier::Tier3 => 3,
            Tier::Tier4 => 4,
        };
        write!(f, "tier {}", n)
    }
}

/// Token bucket configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst_capacity: u32,
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::for_tier(Tier::Tier3)
    }
}

impl RateLimitConfig {
    /// Evenly spaced calls at the tier's published rate
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            requests_per_minute: tier.requests_per_minute(),
            burst_capacity: 1,
            enabled: true,
        }
    }

    /// No limiting at all
    pub fn disabled() -> Self {
        Self {
            requests_per_minute: u32::MAX,
            burst_capacity: u32::MAX,
            enabled: false,
        }
    }
}
