//! Fixed-size pool of workers processing queued tasks.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::queue::TaskReceiver;
use crate::metrics;
use crate::orchestrator::{panic_message, TaskOrchestrator};

/// Long-lived workers pulling task ids off the shared queue.
///
/// Two shutdown paths, usable in any order and any number of times:
/// [`cancel`](Self::cancel) stops workers from taking new ids, while
/// [`drain`](Self::drain) closes the queue and waits until every queued id
/// has been processed.
pub struct WorkerPool {
    orchestrator: Arc<TaskOrchestrator>,
    receiver: Arc<TaskReceiver>,
    cancel: CancellationToken,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawn `count` workers (at least one) on the current runtime.
    pub fn start(
        orchestrator: Arc<TaskOrchestrator>,
        receiver: TaskReceiver,
        count: usize,
    ) -> Self {
        let receiver = Arc::new(receiver);
        let cancel = CancellationToken::new();
        let count = count.max(1);

        let handles = (0..count)
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&orchestrator),
                    Arc::clone(&receiver),
                    cancel.clone(),
                ))
            })
            .collect();

        info!(workers = count, "Worker pool started");

        Self {
            orchestrator,
            receiver,
            cancel,
            handles: Mutex::new(handles),
        }
    }

    /// Stop workers from taking new ids. A task already dequeued still
    /// finishes. Queued ids may be left unprocessed.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            info!("Worker pool cancelled");
        }
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the queue, then wait for all workers to finish.
    ///
    /// Without a prior [`cancel`](Self::cancel), workers consume every queued
    /// id first. Pushes after this point fail. Concurrent callers all return
    /// only once the workers are gone.
    pub async fn drain(&self) {
        if self.orchestrator.close_queue() {
            info!("Task queue closed, draining workers");
        }

        // A handle is popped only after it resolves, so a caller dropped
        // mid-drain leaves the rest for the next one.
        let mut handles = self.handles.lock().await;
        while let Some(handle) = handles.last_mut() {
            if let Err(e) = handle.await {
                error!(error = %e, "Worker terminated abnormally");
            }
            handles.pop();
        }
        drop(handles);

        // Workers are gone: refuse anything still waiting to be queued.
        self.receiver.close().await;
        debug!("Worker pool drained");
    }
}

async fn run_worker(
    worker: usize,
    orchestrator: Arc<TaskOrchestrator>,
    receiver: Arc<TaskReceiver>,
    cancel: CancellationToken,
) {
    debug!(worker, "Worker started");

    loop {
        let id = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(worker, "Worker received cancellation");
                break;
            }
            next = receiver.recv() => match next {
                Some(id) => id,
                None => break,
            },
        };

        debug!(worker, task_id = id, "Worker picked up task");
        match AssertUnwindSafe(orchestrator.process_task(id))
            .catch_unwind()
            .await
        {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                metrics::PROCESSING_ERRORS.inc();
                warn!(worker, task_id = id, error = %e, "Task processing failed");
            }
            Err(panic) => {
                metrics::WORKER_PANICS.inc();
                error!(
                    worker,
                    task_id = id,
                    panic = %panic_message(panic.as_ref()),
                    "Task processing panicked"
                );
            }
        }
    }

    debug!(worker, "Worker stopped");
}
