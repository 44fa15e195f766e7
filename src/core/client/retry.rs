use std::time::Duration;

/// Specifies the backoff strategy between retried match-history pages.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// The delay to wait after the `attempt`-th failure (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else if secs <= 0.0 {
                    Duration::ZERO
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// Retry policy for the per-player match-history crawl.
///
/// The budget is shared between expired-session (HTTP 403) retries and
/// transport/decode failures: `max_retries` failures of either kind, in any
/// mix, end the fetch for that player.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// The number of failed page attempts tolerated per player.
    pub max_retries: u32,
    /// The backoff strategy applied after transport failures.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::Fixed(Duration::from_secs(2)),
        }
    }
}

/// Fixed delays inserted after every request to stay inside the API's request budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Delay applied after each profile lookup, each successful history page
    /// and between roster pages.
    pub request_delay: Duration,
}

impl Pacing {
    /// No delays at all. Useful against local mock servers.
    pub const fn none() -> Self {
        Self {
            request_delay: Duration::ZERO,
        }
    }

    pub(crate) async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
        }
    }
}
