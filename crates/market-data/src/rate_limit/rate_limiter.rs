//! Fixed-window rate limiter.
//!
//! The window is re-anchored on every released call, so a steady trickle of
//! calls keeps extending the current window. This is more lenient than a
//! true sliding window and is what existing mapping runs were paced with.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::provider::RateLimit;

#[derive(Debug, Default)]
struct WindowState {
    /// Start of the current window, `None` before the first call.
    window_start: Option<Instant>,
    /// Calls released in the current window.
    calls: u32,
}

/// Caps the number of calls released per window.
///
/// State lives behind an async mutex that stays locked while a caller
/// sleeps, so concurrent callers queue up behind the one waiting.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    capacity: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

impl FixedWindowRateLimiter {
    /// Create a limiter releasing at most `capacity` calls per `window`.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            window,
            state: Mutex::new(WindowState::default()),
        }
    }

    /// Create a limiter from a provider's advertised [`RateLimit`].
    pub fn from_limit(limit: &RateLimit) -> Self {
        Self::new(limit.max_calls, limit.window)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait until a call may be made. Never fails.
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        match state.window_start {
            Some(start) if now.duration_since(start) < self.window => {
                if state.calls >= self.capacity {
                    let wait = self.window - now.duration_since(start);
                    info!(
                        "Rate limit of {} calls per {:?} reached, waiting {:.1}s",
                        self.capacity,
                        self.window,
                        wait.as_secs_f64()
                    );
                    sleep(wait).await;
                    state.calls = 0;
                }
            }
            _ => state.calls = 0,
        }

        state.window_start = Some(Instant::now());
        state.calls += 1;
        debug!("Rate limiter: {}/{} calls in window", state.calls, self.capacity);
    }

    /// Calls released in the current window.
    pub async fn calls_in_window(&self) -> u32 {
        self.state.lock().await.calls
    }
}
