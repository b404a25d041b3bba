//! Rate limiting for flood protection.
//!
//! Implements a token bucket algorithm for limiting inbound commands on one
//! connection.

use crate::config::LimitsConfig;
use std::time::Instant;

/// Token bucket rate limiter.
///
/// Uses a token bucket algorithm where:
/// - Tokens are added at a fixed rate per second
/// - Each command costs 1 token
/// - If no tokens are available, the command is rejected (rate limit exceeded)
#[derive(Debug)]
pub struct RateLimiter {
    tokens: f32,
    last_check: Instant,
    rate: f32,
    capacity: f32,
}

impl RateLimiter {
    /// Create a new rate limiter.
    ///
    /// # Arguments
    /// * `rate` - Tokens added per second
    /// * `capacity` - Maximum token capacity (burst size)
    pub fn new(rate: f32, capacity: f32) -> Self {
        Self {
            tokens: capacity,
            last_check: Instant::now(),
            rate,
            capacity,
        }
    }

    /// A limiter for one connection under `limits`.
    pub fn from_limits(limits: &LimitsConfig) -> Self {
        Self::new(limits.message_rate, limits.message_burst)
    }

    /// Check if a command can be processed.
    ///
    /// Returns `true` if the command is allowed (token consumed),
    /// `false` if the rate limit is exceeded.
    pub fn check(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_check).as_secs_f32();
        self.last_check = now;

        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
