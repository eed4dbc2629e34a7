//! Per-stage timeout and cooperative cancellation.
//!
//! Every awaited chain interaction runs under a [`StageGuard`], which
//! bounds it by the configured stage timeout and races it against a
//! [`CancelToken`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

/// Stages of the provisioning flow and the flows that share its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Chain id and request checks.
    Validation,
    Resolution,
    StateRead,
    Approval,
    Mint,
    Record,
    History,
    TokenRead,
    Purchase,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "request validation",
            Self::Resolution => "pool resolution",
            Self::StateRead => "pool state read",
            Self::Approval => "token approval",
            Self::Mint => "mint",
            Self::Record => "ledger record",
            Self::History => "history read",
            Self::TokenRead => "token read",
            Self::Purchase => "token purchase",
        };
        f.write_str(name)
    }
}

/// Fires a [`CancelToken`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancels every stage guarded by the paired token.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Cooperative cancellation signal observed by [`StageGuard`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Creates a token and the handle that fires it.
    #[must_use]
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx: Arc::new(tx) }, CancelToken { rx })
    }

    /// A token that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the token is cancelled. Pends forever if the handle
    /// is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Why a guarded stage did not produce a value.
#[derive(Debug)]
pub enum StageFailure {
    /// The underlying call failed.
    Failed(anyhow::Error),
    /// The stage timeout elapsed first.
    TimedOut(Duration),
    Cancelled,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(e) => write!(f, "{e:#}"),
            Self::TimedOut(limit) => write!(f, "timed out after {}s", limit.as_secs_f64()),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Bounds awaited work by a timeout and a cancellation token.
#[derive(Debug, Clone)]
pub struct StageGuard {
    timeout: Duration,
    cancel: CancelToken,
}

impl StageGuard {
    pub fn new(timeout: Duration, cancel: CancelToken) -> Self {
        Self { timeout, cancel }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs `work` unless the token is already cancelled.
    pub async fn run<T, F>(&self, stage: Stage, work: F) -> Result<T, StageFailure>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        if self.cancel.is_cancelled() {
            warn!(stage = %stage, "Stage skipped, already cancelled");
            return Err(StageFailure::Cancelled);
        }
        self.finish(stage, work).await
    }

    /// Runs `work` even if the token is already cancelled. Cancellation
    /// then only stops the wait for its result.
    pub async fn finish<T, F>(&self, stage: Stage, work: F) -> Result<T, StageFailure>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        tokio::select! {
            biased;
            outcome = tokio::time::timeout(self.timeout, work) => match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(StageFailure::Failed(e)),
                Err(_) => {
                    warn!(stage = %stage, timeout_secs = self.timeout.as_secs(), "Stage timed out");
                    Err(StageFailure::TimedOut(self.timeout))
                }
            },
            () = self.cancel.cancelled() => {
                warn!(stage = %stage, "Stage cancelled");
                Err(StageFailure::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn guard(cancel: CancelToken) -> StageGuard {
        StageGuard::new(Duration::from_secs(5), cancel)
    }

    #[tokio::test]
    async fn test_passes_through_success_and_failure() {
        let guard = guard(CancelToken::never());

        let value = guard.run(Stage::Mint, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);

        let failure = guard
            .run(Stage::Mint, async { Err::<(), _>(anyhow!("reverted")) })
            .await
            .unwrap_err();
        assert_eq!(failure.to_string(), "reverted");
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let guard = StageGuard::new(Duration::from_secs(3), CancelToken::never());
        let failure = guard
            .run(Stage::StateRead, async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(matches!(failure, StageFailure::TimedOut(_)));
        assert_eq!(failure.to_string(), "timed out after 3s");
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_work() {
        let (handle, token) = CancelToken::pair();
        let guard = guard(token);

        let pending = tokio::spawn(async move {
            guard
                .run(Stage::Approval, std::future::pending::<anyhow::Result<()>>())
                .await
        });
        tokio::task::yield_now().await;
        handle.cancel();

        let outcome = pending.await.unwrap();
        assert!(matches!(outcome, Err(StageFailure::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_skips_work_once_cancelled() {
        let (handle, token) = CancelToken::pair();
        handle.cancel();
        let guard = guard(token);

        let outcome = guard.run(Stage::Mint, async { Ok(1) }).await;
        assert!(matches!(outcome, Err(StageFailure::Cancelled)));

        // finish still attempts ready work
        let outcome = guard.finish(Stage::Record, async { Ok(1) }).await;
        assert_eq!(outcome.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_never_token_stays_active() {
        let token = CancelToken::never();
        assert!(!token.is_cancelled());
        let waited =
            tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(waited.is_err());
    }
}
