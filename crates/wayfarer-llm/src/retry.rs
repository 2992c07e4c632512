//! Bounded re-attempt policy for transient transport failures.

use std::future::Future;

use crate::error::InferenceError;

/// Wraps one logical invocation in up to `max_attempts` attempts.
///
/// Only transport-level failures are retried. Application errors (a
/// provider `error` field, a decode or validation failure) end the call
/// immediately, on the first attempt they appear.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Drives `op` until it succeeds, fails terminally, or the attempt
    /// budget runs out. Exhaustion surfaces the last transport failure as
    /// [`InferenceError::RetriesExhausted`].
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, InferenceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, InferenceError>>,
    {
        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                tracing::debug!(attempt, max = self.max_attempts, "retrying after transport failure");
            }
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    tracing::warn!(attempt, error = %err, "attempt failed");
                    last_error = err.to_string();
                }
                Err(err) => return Err(err),
            }
        }
        Err(InferenceError::RetriesExhausted {
            attempts: self.max_attempts,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_on_third_attempt() {
        let policy = RetryPolicy::new(3);
        let attempts = AtomicU32::new(0);

        let result = policy
            .run(|| async {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(InferenceError::Transport("connection refused".into()))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausts_after_max_attempts() {
        let policy = RetryPolicy::new(3);
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(InferenceError::Transport("connection reset".into()))
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        match result {
            Err(InferenceError::RetriesExhausted { attempts, last_error }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("connection reset"));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn application_errors_are_not_retried() {
        let policy = RetryPolicy::new(3);
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(InferenceError::Api {
                    status: Some(400),
                    message: "bad request".into(),
                })
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(InferenceError::Api { .. })));
    }
}
