//! Deadline and cancellation for store operations.

use std::future::Future;
use std::time::Duration;

use companyflow_core::AppError;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds one store call. Dropping the inner future on expiry releases its
/// pooled connection.
#[derive(Debug, Clone)]
pub struct QueryGuard {
    timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl Default for QueryGuard {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_QUERY_TIMEOUT,
            cancel: None,
        }
    }
}

impl QueryGuard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn run<T, F>(&self, operation: &'static str, future: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let bounded = tokio::time::timeout(self.timeout, future);

        let outcome = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::warn!(operation, "store operation cancelled");
                        return Err(AppError::Cancelled(operation.to_string()));
                    }
                    outcome = bounded => outcome,
                }
            }
            None => bounded.await,
        };

        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "store operation timed out"
                );
                Err(AppError::Timeout(format!(
                    "{} exceeded {:?}",
                    operation, self.timeout
                )))
            }
        }
    }
}
