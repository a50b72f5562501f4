//! Bounded FIFO queue of ready task ids.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tracing::debug;

use crate::task::TaskId;

/// The queue no longer accepts ids.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("task queue is closed")]
pub struct QueueClosed;

/// Producer side of the ready-task queue.
#[derive(Debug)]
pub struct TaskQueue {
    sender: Mutex<Option<mpsc::Sender<TaskId>>>,
}

/// Consumer side, shared by all workers.
#[derive(Debug)]
pub struct TaskReceiver {
    inner: AsyncMutex<mpsc::Receiver<TaskId>>,
}

/// Create a queue holding at most `capacity` ids (at least one).
pub fn task_queue(capacity: usize) -> (TaskQueue, TaskReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        TaskQueue {
            sender: Mutex::new(Some(tx)),
        },
        TaskReceiver {
            inner: AsyncMutex::new(rx),
        },
    )
}

impl TaskQueue {
    /// Push an id, waiting while the queue is full.
    ///
    /// Fails once the queue has been closed, including while waiting.
    pub async fn push(&self, id: TaskId) -> Result<(), QueueClosed> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(QueueClosed)?;

        sender.send(id).await.map_err(|_| QueueClosed)?;
        debug!(task_id = id, "Task queued");
        Ok(())
    }

    /// Stop accepting ids. Ids already queued stay available to consumers.
    ///
    /// Returns true on the call that actually closed the queue.
    pub fn close(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl TaskReceiver {
    /// Next id in FIFO order. `None` once the queue is closed and empty.
    pub async fn recv(&self) -> Option<TaskId> {
        self.inner.lock().await.recv().await
    }

    /// Refuse further ids, including pushes currently waiting for room.
    pub async fn close(&self) {
        self.inner.lock().await.close();
    }
}
