//! Task orchestrator.
//!
//! The orchestrator owns everything between the API surface and the
//! collaborators:
//! - **Admission**: a lock-free cap on tasks that are accepted or in progress
//! - **Attachment**: per-file validation, recorded on the file rather than failing the call
//! - **Processing**: the Accepted -> InProgress -> Completed state machine with a
//!   bounded per-task download fan-out, followed by archiving
//!
//! Every mutation of a task happens under that task's lock from [`TaskLocks`].

mod admission;
mod config;
mod gate;
mod locks;
mod runner;
mod types;
mod validation;

pub use admission::AdmissionControl;
pub use config::OrchestratorConfig;
pub use gate::{CountingGate, GatePermit};
pub use locks::TaskLocks;
pub use runner::TaskOrchestrator;
pub(crate) use runner::panic_message;
pub use types::{AttachedFile, FileRejection, OrchestratorError, ProcessSummary, TaskStatusView};
pub use validation::{can_add_file, check_extension, check_url};
