//! Per-call deadline and cancellation signal.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::RepoError;

/// Deadline and cancellation signal that every store operation honours.
///
/// # Example
/// ```ignore
/// let ctx = RequestContext::with_timeout(Duration::from_secs(10));
/// let post = service.get_by_id(&ctx, id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// A context with no deadline that is never cancelled unless asked to.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: CancellationToken::new(),
        }
    }

    /// Tie this context to an externally owned token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fail fast if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), RepoError> {
        if self.cancel.is_cancelled() {
            return Err(RepoError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RepoError::Timeout),
            _ => Ok(()),
        }
    }

    /// Run a store operation under this context.
    ///
    /// The operation is never started once the context is done, and is
    /// dropped mid-flight if the deadline passes or the token fires.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        self.check()?;

        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, operation)
                    .await
                    .unwrap_or(Err(RepoError::Timeout)),
                None => operation.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepoError::Cancelled),
            result = bounded => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_context_runs_operation() {
        let ctx = RequestContext::background();
        let result = ctx.run(async { Ok::<_, RepoError>(42) }).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_expired_deadline_never_starts_operation() {
        let ctx = RequestContext::with_deadline(Instant::now() - Duration::from_millis(1));
        let mut started = false;
        let result = ctx
            .run(async {
                started = true;
                Ok::<_, RepoError>(())
            })
            .await;

        assert!(matches!(result, Err(RepoError::Timeout)));
        assert!(!started);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_slow_operation() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(50));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, RepoError>(())
            })
            .await;

        assert!(matches!(result, Err(RepoError::Timeout)));
    }

    #[tokio::test]
    async fn test_cancelled_token() {
        let token = CancellationToken::new();
        let ctx = RequestContext::background().with_cancellation(token.clone());
        token.cancel();

        assert!(matches!(ctx.check(), Err(RepoError::Cancelled)));
        let result = ctx.run(async { Ok::<_, RepoError>(()) }).await;
        assert!(matches!(result, Err(RepoError::Cancelled)));
    }
}
