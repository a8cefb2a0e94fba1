//! Rate limiting
//!
//! Login attempts are throttled per email address so one account cannot be
//! brute-forced from many clients.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{debug, warn};

use crate::config::RateLimitSettings;
use crate::utils::errors::{ClubPortalError, Result};

/// Keyed login throttle
#[derive(Clone)]
pub struct LoginThrottle {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl LoginThrottle {
    pub fn new(settings: &RateLimitSettings) -> Self {
        let per_minute = NonZeroU32::new(settings.login_attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.login_burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Record an attempt for `email`, failing once its quota is used up
    pub fn check(&self, email: &str) -> Result<()> {
        let key = email.trim().to_lowercase();
        self.limiter.check_key(&key).map_err(|_| {
            warn!(email = %key, "Login attempts rate limited");
            ClubPortalError::RateLimitExceeded
        })
    }

    /// Number of emails with limiter state
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }

    /// Forget emails whose quota has fully replenished; returns how many
    /// are still tracked
    pub fn prune(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        let remaining = self.limiter.len();
        debug!(remaining_keys = remaining, "Pruned login throttle");
        remaining
    }

    /// Spawn a task that prunes the throttle on `interval`
    pub fn spawn_cleanup(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let throttle = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                throttle.prune();
            }
        })
    }
}

impl std::fmt::Debug for LoginThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginThrottle")
            .field("tracked_keys", &self.limiter.len())
            .finish()
    }
}
