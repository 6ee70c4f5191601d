//! Retry decisions for API calls, kept free of I/O so they can be tested
//! without a network.

use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;
use serde::Deserialize;

/// Why the client is about to sleep before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum WaitReason {
    RateLimited,
    ServerError,
    Transport,
}

/// Why the client gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// A status that retrying cannot fix (4xx other than 429).
    Rejected,
    /// The retry budget is spent.
    Exhausted,
}

/// What to do after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Succeed,
    Retry { delay: Duration, reason: WaitReason },
    Fail(Failure),
}

/// Bounds and delays for retrying requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Server errors back off by `attempt * server_error_step`.
    pub server_error_step: Duration,
    /// Wait used when a 429 carries no usable retry hint.
    pub default_rate_limit_wait: Duration,
    /// Upper bound of the random jitter added to rate-limit waits.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            server_error_step: Duration::from_millis(500),
            default_rate_limit_wait: Duration::from_secs(1),
            max_jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Decide the next step after attempt number `attempt` (1-based).
    ///
    /// `status` is `None` when the request never produced a response.
    /// `server_wait` is the wait the server asked for on a 429, if any.
    pub fn next_action(
        &self,
        attempt: u32,
        status: Option<StatusCode>,
        server_wait: Option<Duration>,
        jitter: Duration,
    ) -> Action {
        let reason = match status {
            Some(status) if status.is_success() => return Action::Succeed,
            Some(StatusCode::TOO_MANY_REQUESTS) => WaitReason::RateLimited,
            Some(status) if status.is_server_error() => WaitReason::ServerError,
            Some(_) => return Action::Fail(Failure::Rejected),
            None => WaitReason::Transport,
        };

        if attempt > self.max_retries {
            return Action::Fail(Failure::Exhausted);
        }

        let delay = match reason {
            WaitReason::RateLimited => {
                server_wait.unwrap_or(self.default_rate_limit_wait) + jitter.min(self.max_jitter)
            }
            WaitReason::ServerError | WaitReason::Transport => self.server_error_step * attempt,
        };
        Action::Retry { delay, reason }
    }

    /// Draw a random jitter in `0..=max_jitter`.
    pub fn sample_jitter(&self) -> Duration {
        let max = self.max_jitter.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(0..=max))
    }
}

#[derive(Deserialize)]
struct RateLimitBody {
    retry_after: Option<f64>,
}

/// Extract the wait a 429 response asks for.
///
/// Discord puts `retry_after` (seconds, fractional) in the JSON body; the
/// `Retry-After` header is the fallback. Returns `None` if neither parses.
pub fn parse_retry_after(body: &str, header: Option<&str>) -> Option<Duration> {
    let from_body = serde_json::from_str::<RateLimitBody>(body)
        .ok()
        .and_then(|b| b.retry_after);
    let from_header = || header.and_then(|h| h.trim().parse::<f64>().ok());

    from_body
        .or_else(from_header)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}
