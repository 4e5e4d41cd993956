//! Pacing between mutation calls.
//!
//! The controller awaits [`Pacer::pause`] after every follow/unfollow call,
//! whatever its outcome. Pacing only spaces out requests for the upstream
//! rate limit; it never decides control flow.

use std::future::Future;
use std::time::Duration;

/// Delay strategy applied after each mutation.
pub trait Pacer: Send + Sync {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Sleep a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// No delay at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let start = Instant::now();
        FixedDelay::from_millis(1000).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_is_instant() {
        let start = Instant::now();
        NoDelay.pause().await;
        FixedDelay(Duration::ZERO).pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
