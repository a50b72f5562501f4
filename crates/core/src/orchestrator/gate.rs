//! Counting gate bounding concurrent holders of a resource.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Lets at most `width` holders through at once.
///
/// Cloning a gate shares its slots.
#[derive(Debug, Clone)]
pub struct CountingGate {
    semaphore: Arc<Semaphore>,
}

/// A held slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl CountingGate {
    /// Creates a gate with `width` slots. A width of 0 is treated as 1.
    pub fn new(width: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(width.max(1))),
        }
    }

    /// Wait until a slot is free and take it.
    pub async fn acquire(&self) -> Result<GatePermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        Ok(GatePermit { _permit: permit })
    }

    /// Number of free slots.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_and_release() {
        let gate = CountingGate::new(2);
        let first = gate.acquire().await.unwrap();
        let _second = gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        drop(first);
        assert_eq!(gate.available(), 1);
    }

    #[tokio::test]
    async fn test_zero_width_is_one() {
        let gate = CountingGate::new(0);
        assert_eq!(gate.available(), 1);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_release() {
        let gate = CountingGate::new(1);
        let held = gate.acquire().await.unwrap();

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move {
                let _permit = gate.acquire().await.unwrap();
                42
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(held);
        assert_eq!(waiter.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_full_gate_is_pending() {
        use tokio_test::{assert_pending, assert_ready_ok, task};

        let gate = CountingGate::new(1);
        let held = gate.acquire().await.unwrap();

        let mut waiting = task::spawn(gate.acquire());
        assert_pending!(waiting.poll());

        drop(held);
        assert!(waiting.is_woken());
        let _permit = assert_ready_ok!(waiting.poll());
    }

    #[tokio::test]
    async fn test_bounds_concurrent_holders() {
        let gate = CountingGate::new(3);
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..12 {
            let gate = gate.clone();
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _permit = gate.acquire().await.unwrap();
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(gate.available(), 3);
    }
}
