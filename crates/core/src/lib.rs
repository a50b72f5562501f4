pub mod archiver;
pub mod config;
pub mod downloader;
pub mod metrics;
pub mod orchestrator;
pub mod task;
pub mod testing;
pub mod validator;
pub mod worker;

pub use archiver::{ArchiveError, Archiver, ZipArchiver};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError,
};
pub use downloader::{DownloadError, Downloader, HttpDownloader};
pub use orchestrator::{
    AttachedFile, FileRejection, OrchestratorConfig, OrchestratorError, ProcessSummary,
    TaskOrchestrator, TaskStatusView,
};
pub use task::{
    File, FileStatus, InMemoryTaskStore, Task, TaskId, TaskStatus, TaskStore, TaskStoreError,
};
pub use validator::{HttpUrlValidator, UrlValidator};
pub use worker::{task_queue, QueueClosed, TaskQueue, TaskReceiver, WorkerPool};
