//! Worker pool draining the ready-task queue.
//!
//! A task becomes ready when its last file is attached. The orchestrator
//! pushes its id onto a bounded [`TaskQueue`]; a fixed set of workers pulls
//! ids from the shared [`TaskReceiver`] and runs
//! [`TaskOrchestrator::process_task`](crate::orchestrator::TaskOrchestrator::process_task).

mod pool;
mod queue;

pub use pool::WorkerPool;
pub use queue::{task_queue, QueueClosed, TaskQueue, TaskReceiver};
