//! Request spacing and rate-limit retries for shared public backends
//!
//! Public Overpass and Nominatim instances expect each client to keep a
//! minimum gap between requests and answer `429 Too Many Requests` when it
//! does not. [`RateLimitedClient`] enforces the gap for every call made
//! through one instance and retries calls that came back rate limited.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::throttle::{RateLimitedClient, ThrottleConfig};
//!
//! let throttle = RateLimitedClient::new("overpass", &ThrottleConfig::overpass());
//! let elements = throttle.call(|| client.query(&query)).await?;
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use integration_geocoding::GeocodingError;
use integration_overpass::OverpassError;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Errors that can carry a backend's "too many requests" signal
pub trait RateLimitSignal {
    /// Whether the backend asked the caller to slow down
    fn is_rate_limited(&self) -> bool;
}

impl RateLimitSignal for OverpassError {
    fn is_rate_limited(&self) -> bool {
        Self::is_rate_limited(self)
    }
}

impl RateLimitSignal for GeocodingError {
    fn is_rate_limited(&self) -> bool {
        Self::is_rate_limited(self)
    }
}

/// Spacing and retry budget for one throttled backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum gap between two requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Retries after a rate-limited first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_min_interval_ms() -> u64 {
    2000
}

const fn default_max_retries() -> u32 {
    2
}

/// Upper bound for `min_interval_ms` (ten minutes)
pub const MAX_MIN_INTERVAL_MS: u64 = 600_000;

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::overpass()
    }
}

impl ThrottleConfig {
    /// Budget for a public Overpass instance
    #[must_use]
    pub const fn overpass() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            max_retries: default_max_retries(),
        }
    }

    /// Budget matching the Nominatim usage policy (one request per second)
    #[must_use]
    pub const fn nominatim() -> Self {
        Self {
            min_interval_ms: 1100,
            max_retries: default_max_retries(),
        }
    }

    /// Minimum gap as a duration
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or above
    /// [`MAX_MIN_INTERVAL_MS`].
    pub fn validate(&self) -> Result<(), String> {
        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be greater than 0".to_string());
        }
        if self.min_interval_ms > MAX_MIN_INTERVAL_MS {
            return Err(format!(
                "min_interval_ms must be at most {MAX_MIN_INTERVAL_MS}"
            ));
        }
        Ok(())
    }
}

/// Serializes calls to one backend and spaces them by a minimum interval
#[derive(Debug)]
pub struct RateLimitedClient {
    name: &'static str,
    min_interval: Duration,
    max_retries: u32,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimitedClient {
    /// Create a throttle; `name` only labels log lines
    #[must_use]
    pub fn new(name: &'static str, config: &ThrottleConfig) -> Self {
        Self {
            name,
            min_interval: config.min_interval(),
            max_retries: config.max_retries,
            last_call: Mutex::new(None),
        }
    }

    /// Minimum gap between two requests
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Delay before retry number `attempt + 1`, saturating at [`Duration::MAX`]
    const fn backoff(&self, attempt: u32) -> Duration {
        self.min_interval.saturating_mul(attempt.saturating_add(2))
    }

    /// Wait until the minimum interval since the previous call has passed,
    /// then claim the slot.
    ///
    /// The lock is held across the sleep and the new timestamp is written
    /// before it is released, so concurrent callers queue up behind each
    /// other.
    async fn wait_turn(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(
                    backend = self.name,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "Spacing request"
                );
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }

    /// Run `operation` once its turn comes up.
    ///
    /// A rate-limited failure is retried up to `max_retries` more times,
    /// waiting `min_interval * (attempt + 2)` before each retry. Any other
    /// error, or the last rate-limited one, is returned unchanged.
    pub async fn call<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RateLimitSignal + Display,
    {
        let mut attempt: u32 = 0;

        loop {
            self.wait_turn().await;

            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(backend = self.name, attempt, "Succeeded after rate limiting");
                    }
                    return Ok(value);
                },
                Err(err) if err.is_rate_limited() && attempt < self.max_retries => {
                    let backoff = self.backoff(attempt);
                    warn!(
                        backend = self.name,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                },
                Err(err) => {
                    if err.is_rate_limited() {
                        warn!(
                            backend = self.name,
                            attempts = attempt + 1,
                            error = %err,
                            "Rate limit retries exhausted"
                        );
                    }
                    return Err(err);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[derive(Debug)]
    struct TestError {
        rate_limited: bool,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            if self.rate_limited {
                f.write_str("HTTP 429")
            } else {
                f.write_str("HTTP 500")
            }
        }
    }

    impl RateLimitSignal for TestError {
        fn is_rate_limited(&self) -> bool {
            self.rate_limited
        }
    }

    fn throttle() -> RateLimitedClient {
        RateLimitedClient::new("test", &ThrottleConfig::overpass())
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced() {
        let throttle = throttle();

        let first = throttle
            .call(|| async { Ok::<_, TestError>(Instant::now()) })
            .await
            .unwrap();
        let second = throttle
            .call(|| async { Ok::<_, TestError>(Instant::now()) })
            .await
            .unwrap();

        assert!(second - first >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let throttle = throttle();
        let start = Instant::now();

        throttle
            .call(|| async { Ok::<_, TestError>(()) })
            .await
            .unwrap();

        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_serialized() {
        let throttle = Arc::new(throttle());
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                tokio::spawn(async move {
                    throttle
                        .call(|| async { Ok::<_, TestError>(Instant::now()) })
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.unwrap());
        }
        stamps.sort();

        assert!(stamps[1] - stamps[0] >= Duration::from_secs(2));
        assert!(stamps[2] - stamps[1] >= Duration::from_secs(2));
        assert!(stamps[2] - start >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_rate_limit_then_succeeds() {
        let throttle = throttle();
        let attempts = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = throttle
            .call(|| {
                let count = Arc::clone(&attempts);
                async move {
                    if count.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(TestError { rate_limited: true })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // 2s * 2 before the first retry, 2s * 3 before the second
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let throttle = throttle();
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Result<(), TestError> = throttle
            .call(|| {
                let count = Arc::clone(&attempts);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(TestError { rate_limited: true })
                }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.rate_limited);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let throttle = throttle();
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Result<(), TestError> = throttle
            .call(|| {
                let count = Arc::clone(&attempts);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(TestError {
                        rate_limited: false,
                    })
                }
            })
            .await;

        assert!(!result.unwrap_err().rate_limited);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let throttle = RateLimitedClient::new(
            "test",
            &ThrottleConfig {
                min_interval_ms: 100,
                max_retries: 0,
            },
        );
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Result<(), TestError> = throttle
            .call(|| {
                let count = Arc::clone(&attempts);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(TestError { rate_limited: true })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn integration_errors_report_rate_limit() {
        let overpass = OverpassError::RateLimitExceeded {
            retry_after_secs: None,
        };
        assert!(RateLimitSignal::is_rate_limited(&overpass));
        assert!(!RateLimitSignal::is_rate_limited(
            &OverpassError::RequestFailed("HTTP 504".to_string())
        ));
        assert!(RateLimitSignal::is_rate_limited(
            &GeocodingError::RateLimitExceeded
        ));
    }

    #[test]
    fn config_defaults() {
        assert_eq!(ThrottleConfig::default(), ThrottleConfig::overpass());
        assert_eq!(ThrottleConfig::nominatim().min_interval(), Duration::from_millis(1100));
        assert!(ThrottleConfig::overpass().validate().is_ok());
        assert!(
            ThrottleConfig {
                min_interval_ms: 0,
                max_retries: 1
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn interval_above_ten_minutes_is_rejected() {
        let at_cap = ThrottleConfig {
            min_interval_ms: MAX_MIN_INTERVAL_MS,
            max_retries: 2,
        };
        assert!(at_cap.validate().is_ok());

        let huge = ThrottleConfig {
            min_interval_ms: u64::MAX,
            max_retries: 2,
        };
        let err = huge.validate().unwrap_err();
        assert!(err.contains("at most"));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let throttle = RateLimitedClient::new(
            "test",
            &ThrottleConfig {
                min_interval_ms: u64::MAX,
                max_retries: u32::MAX,
            },
        );
        assert_eq!(throttle.backoff(0), Duration::MAX);
        assert_eq!(throttle.backoff(u32::MAX), Duration::MAX);

        assert_eq!(self::throttle().backoff(0), Duration::from_secs(4));
        assert_eq!(self::throttle().backoff(1), Duration::from_secs(6));
    }
}
