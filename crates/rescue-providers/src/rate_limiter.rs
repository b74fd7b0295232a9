//! Pacing for classification calls
//!
//! Hosted inference endpoints throttle bursts, so batch runs space their
//! calls out. A single [`RequestPacer`] is shared by every worker of a batch;
//! each call holds a [`PacerTurn`] for its duration, and the next call may
//! only start once the interval has passed since that turn ended.

use std::time::Duration;

use tokio::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use tracing::trace;

/// Minimum-gap pacer
///
/// At most one turn is outstanding at a time. A new turn starts no earlier
/// than `interval` after the previous turn was dropped.
///
/// ```
/// use std::time::Duration;
/// use rescue_providers::RequestPacer;
///
/// # tokio_test::block_on(async {
/// let pacer = RequestPacer::new(Duration::from_millis(10));
/// let turn = pacer.wait_turn().await; // first call goes straight through
/// // ... send the request ...
/// drop(turn);
/// drop(pacer.wait_turn().await); // second waits out the interval
/// # });
/// ```
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum gap between the end of one call and the start of the next
    interval: Duration,
    /// Earliest instant at which the next call may start
    next_slot: Mutex<Option<Instant>>,
}

/// A granted pacing slot
///
/// Dropping the turn marks the call as finished and schedules the next slot.
#[must_use = "the pacing gap is measured from when the turn is dropped"]
#[derive(Debug)]
pub struct PacerTurn<'a> {
    slot: Option<MutexGuard<'a, Option<Instant>>>,
    interval: Duration,
}

impl Drop for PacerTurn<'_> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.as_mut() {
            **slot = Some(Instant::now() + self.interval);
        }
    }
}

impl RequestPacer {
    /// Create a new pacer
    ///
    /// # Arguments
    /// * `interval` - Minimum gap between calls (e.g., 50ms)
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A pacer that never waits
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until this caller may issue its request
    ///
    /// The returned turn must be held until the request has completed.
    pub async fn wait_turn(&self) -> PacerTurn<'_> {
        if self.interval.is_zero() {
            return PacerTurn {
                slot: None,
                interval: self.interval,
            };
        }

        // The guard travels with the turn, so other callers queue until it is dropped
        let next_slot = self.next_slot.lock().await;
        if let Some(slot) = *next_slot {
            let now = Instant::now();
            if slot > now {
                trace!("Pacing classification call for {:?}", slot - now);
                tokio::time::sleep_until(slot).await;
            }
        }
        PacerTurn {
            slot: Some(next_slot),
            interval: self.interval,
        }
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_call_does_not_wait() {
        let pacer = RequestPacer::new(Duration::from_secs(5));
        let start = Instant::now();
        drop(pacer.wait_turn().await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_unlimited_never_waits() {
        let pacer = RequestPacer::unlimited();
        let start = Instant::now();
        for _ in 0..100 {
            drop(pacer.wait_turn().await);
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_calls_are_spaced() {
        let pacer = RequestPacer::new(Duration::from_millis(20));
        let start = Instant::now();
        for _ in 0..3 {
            drop(pacer.wait_turn().await);
        }
        // Three calls need two full intervals between them
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_interval_counts_from_call_end() {
        let pacer = RequestPacer::new(Duration::from_millis(30));

        let turn = pacer.wait_turn().await;
        // A call slower than the interval itself
        tokio::time::sleep(Duration::from_millis(60)).await;
        let finished = Instant::now();
        drop(turn);

        drop(pacer.wait_turn().await);
        assert!(finished.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_concurrent_callers_wait_for_outstanding_turn() {
        let pacer = Arc::new(RequestPacer::new(Duration::from_millis(20)));
        let turn = pacer.wait_turn().await;

        let waiter = {
            let pacer = pacer.clone();
            tokio::spawn(async move {
                drop(pacer.wait_turn().await);
                Instant::now()
            })
        };

        tokio::time::sleep(Duration::from_millis(40)).await;
        let finished = Instant::now();
        drop(turn);

        let started = waiter.await.unwrap();
        assert!(started >= finished + Duration::from_millis(20));
    }
}
