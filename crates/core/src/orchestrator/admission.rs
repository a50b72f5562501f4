//! Admission control over the number of active tasks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counter capping how many tasks may be active at once.
///
/// All updates go through compare-and-swap loops so the count never
/// exceeds `max` and never underflows.
#[derive(Debug)]
pub struct AdmissionControl {
    active: AtomicU64,
    max: u64,
}

impl AdmissionControl {
    pub fn new(max: u64) -> Self {
        Self {
            active: AtomicU64::new(0),
            max,
        }
    }

    /// Reserve one slot. Returns false when the limit is reached.
    pub fn try_acquire(&self) -> bool {
        let mut current = self.active.load(Ordering::Acquire);
        loop {
            if current >= self.max {
                return false;
            }
            match self.active.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    /// Give one slot back. A release without a matching acquire is ignored.
    pub fn release(&self) {
        let _ = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Number of currently reserved slots.
    pub fn active(&self) -> u64 {
        self.active.load(Ordering::Acquire)
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}
