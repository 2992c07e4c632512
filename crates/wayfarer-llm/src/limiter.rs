//! Sliding-window call throttle shared by every invocation path.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{sleep, Instant};

/// Allows at most `max_calls` acquisitions within any rolling window of
/// `period`.
///
/// Cloning is cheap and shares the window, so a single limiter can gate
/// several clients against one ceiling. Construct one limiter per client
/// for per-instance scoping, or clone one across clients for a
/// process-wide ceiling.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    max_calls: usize,
    period: Duration,
    window: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                max_calls: max_calls.max(1),
                period,
                window: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Waits until a slot is free in the rolling window, then claims it.
    ///
    /// Never fails; a full window only delays the caller. The window lock
    /// is released before sleeping, so concurrent callers serialize on the
    /// shared ceiling without blocking each other's bookkeeping.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut window = self.inner.window.lock();
                let now = Instant::now();
                while window
                    .front()
                    .is_some_and(|&start| now.duration_since(start) >= self.inner.period)
                {
                    window.pop_front();
                }
                match window.front() {
                    Some(&oldest) if window.len() >= self.inner.max_calls => self
                        .inner
                        .period
                        .saturating_sub(now.duration_since(oldest)),
                    _ => {
                        window.push_back(now);
                        return;
                    }
                }
            };
            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            sleep(wait).await;
        }
    }

    /// Calls currently counted against the window.
    pub fn in_flight(&self) -> usize {
        let mut window = self.inner.window.lock();
        let now = Instant::now();
        while window
            .front()
            .is_some_and(|&start| now.duration_since(start) >= self.inner.period)
        {
            window.pop_front();
        }
        window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn acquire_is_immediate_under_the_ceiling() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.in_flight(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_waits_for_the_window_to_roll() {
        let period = Duration::from_secs(60);
        let limiter = RateLimiter::new(2, period);
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= period);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_the_ceiling() {
        let period = Duration::from_millis(100);
        let limiter = RateLimiter::new(2, period);

        let mut handles = Vec::new();
        for _ in 0..6 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                Instant::now()
            }));
        }

        let mut starts = Vec::new();
        for handle in handles {
            starts.push(handle.await.unwrap());
        }
        starts.sort();

        // No window of `period` may contain more than 2 acquisitions.
        for pair in starts.windows(3) {
            assert!(pair[2].duration_since(pair[0]) >= period);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_one_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let other = limiter.clone();
        limiter.acquire().await;
        other.acquire().await;
        assert_eq!(limiter.in_flight(), 2);
        assert_eq!(other.in_flight(), 2);
    }
}
