//! # Shutdown Signal
//!
//! Cancellation token handed to [`ServerUnit::process`](super::ServerUnit::process).
//! Waiting never panics or unwinds: it reports how it ended through
//! [`WaitOutcome`].

use std::time::Duration;

use log::info;
use tokio_util::sync::CancellationToken;

/// How a cancellable wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Completed,
    Cancelled,
}

/// Cloneable shutdown token. All clones observe the same trigger.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Trigger shutdown (call this from the signal handler)
    pub fn trigger(&self) {
        info!("🛑 Shutdown signal received, interrupting pending work");
        self.token.cancel();
    }

    /// Check if shutdown has been triggered (non-blocking)
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Sleep for `duration` unless the signal fires first.
    ///
    /// A signal triggered before the call yields [`WaitOutcome::Cancelled`]
    /// without sleeping.
    pub async fn sleep(&self, duration: Duration) -> WaitOutcome {
        if self.is_triggered() {
            return WaitOutcome::Cancelled;
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => WaitOutcome::Cancelled,
            _ = tokio::time::sleep(duration) => WaitOutcome::Completed,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
