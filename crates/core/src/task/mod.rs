//! Task model and storage.

mod memory_store;
mod store;
mod types;

pub use memory_store::InMemoryTaskStore;
pub use store::{TaskStore, TaskStoreError};
pub use types::{File, FileStatus, Task, TaskId, TaskStatus};
