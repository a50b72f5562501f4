use std::sync::Arc;
use zipper_core::TaskOrchestrator;

/// Shared application state
pub struct AppState {
    orchestrator: Arc<TaskOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<TaskOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &TaskOrchestrator {
        self.orchestrator.as_ref()
    }
}
