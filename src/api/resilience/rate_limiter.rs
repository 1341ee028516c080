//! Token bucket shared by all calls of one Slack tier
//!
//! Every clone of a [`RateLimiter`] draws from the same bucket, so the
//! combined rate of the concurrent wipe tasks stays under the tier limit.

use super::config::RateLimitConfig;
use log::{debug, trace};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Bucket arithmetic, kept free of locking and clocks so it can be driven
/// with explicit instants
#[derive(Debug)]
struct Bucket {
    capacity: f64,
    per_second: f64,
    level: f64,
    updated: Instant,
}

impl Bucket {
    fn full(config: &RateLimitConfig, now: Instant) -> Self {
        let capacity = f64::from(config.burst_capacity.max(1));
        Self {
            capacity,
            per_second: f64::from(config.requests_per_minute) / 60.0,
            level: capacity,
            updated: now,
        }
    }

    fn top_up(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.updated).as_secs_f64();
        self.level = (self.level + elapsed * self.per_second).min(self.capacity);
        self.updated = now;
    }

    /// Take one token, or report how long until one is available
    fn take(&mut self, now: Instant) -> Result<(), Duration> {
        self.top_up(now);
        if self.level >= 1.0 {
            self.level -= 1.0;
            return Ok(());
        }
        if self.per_second <= 0.0 {
            return Err(Duration::from_secs(60));
        }
        let deficit = 1.0 - self.level;
        Err(Duration::from_secs_f64(deficit / self.per_second).max(Duration::from_millis(1)))
    }
}

#[derive(Debug)]
struct Counters {
    bucket: Bucket,
    granted: u64,
    delayed: u64,
    waited: Duration,
}

/// Tier limiter; clones share state
#[derive(Debug, Clone)]
pub struct RateLimiter {
    shared: Arc<Mutex<Counters>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let counters = Counters {
            bucket: Bucket::full(&config, Instant::now()),
            granted: 0,
            delayed: 0,
            waited: Duration::ZERO,
        };
        Self {
            shared: Arc::new(Mutex::new(counters)),
            config,
        }
    }

    /// Wait for a token. A disabled limiter only counts the call.
    pub async fn acquire(&self) {
        let mut waited = Duration::ZERO;
        loop {
            let pending = {
                let mut state = self.state();
                match self.grant(&mut state) {
                    Ok(()) => {
                        if !waited.is_zero() {
                            state.delayed += 1;
                            state.waited += waited;
                        }
                        None
                    }
                    Err(wait) => Some(wait),
                }
            };

            let Some(wait) = pending else {
                return;
            };
            debug!(
                "{} req/min limit reached, waiting {:?}",
                self.config.requests_per_minute, wait
            );
            tokio::time::sleep(wait).await;
            waited += wait;
        }
    }

    /// Take a token if one is available right now
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state();
        self.grant(&mut state).is_ok()
    }

    pub fn stats(&self) -> RateLimiterStats {
        let state = self.state();
        RateLimiterStats {
            requests_made: state.granted,
            requests_delayed: state.delayed,
            total_wait: state.waited,
            enabled: self.config.enabled,
            requests_per_minute: self.config.requests_per_minute,
            burst_capacity: self.config.burst_capacity,
        }
    }

    fn grant(&self, state: &mut Counters) -> Result<(), Duration> {
        if self.config.enabled {
            state.bucket.take(Instant::now())?;
            trace!("token granted, {:.2} left", state.bucket.level);
        }
        state.granted += 1;
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, Counters> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
pub struct RateLimiterStats {
    /// Calls let through, including those that waited
    pub requests_made: u64,
    /// Calls that slept at least once before going out
    pub requests_delayed: u64,
    /// Sum of all sleeps
    pub total_wait: Duration,
    pub enabled: bool,
    pub requests_per_minute: u32,
    pub burst_capacity: u32,
}

impl RateLimiterStats {
    /// Share of calls that went out without waiting
    pub fn immediate_rate(&self) -> f64 {
        if self.requests_made == 0 {
            return 1.0;
        }
        (self.requests_made - self.requests_delayed) as f64 / self.requests_made as f64
    }
}
