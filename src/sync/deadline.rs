//! Per-invocation time budget.

use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock budget measured from the start of this invocation.
///
/// Uses tokio's clock so a paused test runtime controls elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    #[must_use]
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expires_at_budget() {
        let deadline = Deadline::start(Duration::from_secs(2));
        assert!(!deadline.expired());
        assert_eq!(deadline.remaining(), Duration::from_secs(2));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(!deadline.expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(deadline.expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_is_expired() {
        assert!(Deadline::start(Duration::ZERO).expired());
    }
}
