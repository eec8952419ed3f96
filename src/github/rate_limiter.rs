use reqwest::header::HeaderMap;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Remembers the quota GitHub reports so that a listing known to be refused
/// is not sent at all. Never waits.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
            }),
        }
    }

    /// Time left until the quota resets, if it is currently used up.
    pub async fn exhausted_for(&self) -> Option<Duration> {
        let mut state = self.state.lock().await;

        if state.remaining != Some(0) {
            return None;
        }

        match state.reset_at {
            Some(reset_at) if reset_at > Instant::now() => {
                let wait = reset_at - Instant::now();
                tracing::warn!("GitHub rate limit exhausted, resets in {:?}", wait);
                Some(wait)
            }
            _ => {
                state.remaining = None;
                state.reset_at = None;
                None
            }
        }
    }

    /// Reads `x-ratelimit-remaining` and `x-ratelimit-reset` off a response.
    pub fn quota_from(headers: &HeaderMap) -> (Option<u32>, Option<u64>) {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        (remaining, reset)
    }

    pub async fn record(&self, remaining: Option<u32>, reset_timestamp: Option<u64>) {
        let Some(remaining) = remaining else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = reset_timestamp.and_then(|reset| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            (reset > now).then(|| Instant::now() + Duration::from_secs(reset - now))
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
