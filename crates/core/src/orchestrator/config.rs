//! Orchestrator configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Settings the orchestrator needs, gathered from the service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum tasks accepted or in progress at the same time.
    pub max_active_tasks: u64,

    /// Files per task. Reaching this count queues the task; it is also the
    /// download fan-out width during processing.
    pub max_files_per_task: usize,

    /// Allowed file extensions, without the leading dot.
    pub allowed_extensions: Vec<String>,

    /// Root of the per-task download directories.
    pub download_dir: PathBuf,

    /// Directory the archives are written to.
    pub archive_dir: PathBuf,

    /// Base URL used to build archive URLs.
    pub public_url: String,
}

impl OrchestratorConfig {
    /// Download directory of one task.
    pub fn task_download_dir(&self, task_id: u64) -> PathBuf {
        self.download_dir
            .join(crate::task::Task::download_dir_name(task_id))
    }

    /// Archive path of one task.
    pub fn archive_path(&self, task_id: u64) -> PathBuf {
        self.archive_dir
            .join(crate::task::Task::archive_file_name(task_id))
    }

    /// Public archive URL of one task.
    pub fn archive_url(&self, task_id: u64) -> String {
        format!(
            "{}/api/v1/archives/{}",
            self.public_url.trim_end_matches('/'),
            crate::task::Task::archive_file_name(task_id)
        )
    }
}

impl From<&Config> for OrchestratorConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_active_tasks: config.tasks.max_active_tasks,
            max_files_per_task: config.tasks.max_files_per_task,
            allowed_extensions: config.tasks.allowed_extensions.clone(),
            download_dir: config.storage.download_dir.clone(),
            archive_dir: config.storage.archive_dir.clone(),
            public_url: config.server.public_url.clone(),
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
