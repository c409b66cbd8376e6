// Admission gate - queue-depth shedding plus a worker-pool semaphore
//
// Two layers of backpressure in front of the reservation coordinator:
// a cheap atomic counter that sheds requests before any scheduler resource
// is allocated, and a counting semaphore that bounds how many admitted
// requests may press on the stock engine at once.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::gauge;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::TicketingError;

/// Proof that a request passed both admission layers. Holding the permit
/// keeps the worker slot; dropping it (on any exit path) releases the slot.
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

/// Counts a request as waiting from arrival until it is granted a worker
/// slot. The decrement lives in Drop so a cancelled or timed-out request
/// can never leak queue depth.
struct WaitingGuard {
    waiting: Arc<AtomicI64>,
}

impl WaitingGuard {
    fn enter(waiting: &Arc<AtomicI64>, queue_threshold: i64) -> Result<Self, TicketingError> {
        if waiting.fetch_add(1, Ordering::SeqCst) + 1 > queue_threshold {
            waiting.fetch_sub(1, Ordering::SeqCst);
            return Err(TicketingError::QueueFull);
        }
        gauge!("ticketing_admission_waiting").increment(1.0);
        Ok(Self {
            waiting: Arc::clone(waiting),
        })
    }
}

impl Drop for WaitingGuard {
    fn drop(&mut self) {
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        gauge!("ticketing_admission_waiting").decrement(1.0);
    }
}

/// The admission gate in front of `ReserveTicketsUseCase`.
///
/// `queue_threshold` should be well above `worker_pool_size` so short
/// bursts queue instead of shedding.
pub struct AdmissionGate {
    waiting: Arc<AtomicI64>,
    queue_threshold: i64,
    workers: Arc<Semaphore>,
    wait_timeout: Option<Duration>,
}

impl AdmissionGate {
    pub fn new(queue_threshold: usize, worker_pool_size: usize) -> Self {
        Self {
            waiting: Arc::new(AtomicI64::new(0)),
            queue_threshold: queue_threshold as i64,
            workers: Arc::new(Semaphore::new(worker_pool_size.max(1))),
            wait_timeout: None,
        }
    }

    /// Caps how long a queued request may wait for a worker slot before it
    /// fails with `DeadlineExceeded`
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = Some(wait_timeout);
        self
    }

    /// Admits one request: sheds with `QueueFull` past the queue threshold,
    /// then waits for a worker slot. Cancellation-safe: dropping the future
    /// while waiting releases the queue counter.
    pub async fn enter(&self) -> Result<AdmissionPermit, TicketingError> {
        let waiting = WaitingGuard::enter(&self.waiting, self.queue_threshold)?;

        let workers = Arc::clone(&self.workers);
        let permit = match self.wait_timeout {
            Some(limit) => tokio::time::timeout(limit, workers.acquire_owned())
                .await
                .map_err(|_| TicketingError::DeadlineExceeded)?,
            None => workers.acquire_owned().await,
        }
        .map_err(|_| TicketingError::Internal("admission semaphore closed".to_string()))?;

        // A request holding a slot is in-flight, not queued.
        drop(waiting);
        Ok(AdmissionPermit { _permit: permit })
    }

    /// Current number of requests waiting for a worker slot
    pub fn waiting_depth(&self) -> i64 {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Worker slots not currently held
    pub fn available_workers(&self) -> usize {
        self.workers.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_admits_within_pool() {
        let gate = AdmissionGate::new(10, 2);
        let first = gate.enter().await.unwrap();
        let _second = gate.enter().await.unwrap();
        assert_eq!(gate.available_workers(), 0);
        drop(first);
        assert_eq!(gate.available_workers(), 1);
    }

    #[tokio::test]
    async fn test_sheds_past_queue_threshold() {
        let gate = Arc::new(AdmissionGate::new(1, 1));

        // Occupy the single worker slot; the holder no longer counts as waiting.
        let slot = gate.enter().await.unwrap();
        assert_eq!(gate.waiting_depth(), 0);

        // One request may queue for the slot...
        let queued = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.enter().await })
        };
        tokio::task::yield_now().await;
        while gate.waiting_depth() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // ...and the next one is shed.
        let shed = gate.enter().await;
        assert!(matches!(shed, Err(TicketingError::QueueFull)));

        drop(slot);
        let admitted = queued.await.unwrap();
        assert!(admitted.is_ok());
    }

    #[tokio::test]
    async fn test_wait_timeout_elapses() {
        let gate = AdmissionGate::new(10, 1).with_wait_timeout(Duration::from_millis(20));
        let _slot = gate.enter().await.unwrap();

        let result = gate.enter().await;
        assert!(matches!(result, Err(TicketingError::DeadlineExceeded)));
        // The timed-out request must not leave queue depth behind.
        assert_eq!(gate.waiting_depth(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_wait_releases_counter() {
        let gate = Arc::new(AdmissionGate::new(10, 1));
        let _slot = gate.enter().await.unwrap();

        let waiting = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.enter().await })
        };
        while gate.waiting_depth() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        waiting.abort();
        let _ = waiting.await;
        assert_eq!(gate.waiting_depth(), 0);
    }
}
