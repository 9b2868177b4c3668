//! Per-client request rate limiting backed by `governor`.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{ConfigError, FromEnv, env_parse_or};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::client_key;
use crate::errors::{AppError, ErrorCode};

const DEFAULT_PER_SECOND: NonZeroU32 = NonZeroU32::new(10).unwrap();
const DEFAULT_BURST: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// Token-bucket parameters applied to each client independently
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub per_second: NonZeroU32,
    /// Requests allowed in a burst above the sustained rate
    pub burst: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: DEFAULT_PER_SECOND,
            burst: DEFAULT_BURST,
        }
    }
}

impl FromEnv for RateLimitConfig {
    /// - RATE_LIMIT_PER_SECOND: defaults to 10
    /// - RATE_LIMIT_BURST: defaults to 20
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            per_second: env_parse_or("RATE_LIMIT_PER_SECOND", DEFAULT_PER_SECOND)?,
            burst: env_parse_or("RATE_LIMIT_BURST", DEFAULT_BURST)?,
        })
    }
}

/// Shared keyed rate limiter, cheap to clone into middleware state
#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl ClientRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = Quota::per_second(config.per_second).allow_burst(config.burst);
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Take one token for `key`; on refusal returns how long until the next one.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&key.to_string())
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Forget clients whose buckets have fully refilled
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Prune stale clients every `interval` until the returned task is aborted
    pub fn spawn_pruning(&self, interval: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limiter.prune();
                debug!(clients = limiter.tracked_clients(), "Pruned rate limiter state");
            }
        })
    }
}

/// Middleware rejecting clients that exceed their budget with 429.
///
/// # Example
///
/// ```ignore
/// let limiter = ClientRateLimiter::new(RateLimitConfig::from_env()?);
/// let app = Router::new()
///     .route("/api/tasks", get(list_tasks))
///     .layer(axum::middleware::from_fn_with_state(limiter, rate_limit_middleware));
/// ```
pub async fn rate_limit_middleware(
    State(limiter): State<ClientRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            warn!(client = %key, retry_after_ms = wait.as_millis() as u64, "Rate limit exceeded");

            let mut response =
                AppError::TooManyRequests(ErrorCode::TooManyRequests.default_message().to_string())
                    .into_response();
            let retry_after = wait.as_secs_f64().ceil().max(1.0) as u64;
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}
