use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tasks: TaskLimitsConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL clients use to reach this server. Archive URLs are built from it.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

/// Admission and per-task limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskLimitsConfig {
    /// Maximum number of tasks that may be accepted or in progress at once.
    #[serde(default = "default_max_active_tasks")]
    pub max_active_tasks: u64,
    /// Number of files that completes a task. Also the per-task download fan-out width.
    #[serde(default = "default_max_files_per_task")]
    pub max_files_per_task: usize,
    /// File extensions accepted at attach time, without the leading dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for TaskLimitsConfig {
    fn default() -> Self {
        Self {
            max_active_tasks: default_max_active_tasks(),
            max_files_per_task: default_max_files_per_task(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_active_tasks() -> u64 {
    3
}

fn default_max_files_per_task() -> usize {
    3
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "jpeg".to_string()]
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkerConfig {
    /// Number of long-lived workers draining the queue.
    #[serde(default = "default_worker_count")]
    pub count: usize,
    /// Capacity of the ready-task queue. Producers wait when it is full.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_worker_count() -> usize {
    3
}

fn default_queue_capacity() -> usize {
    16
}

/// Filesystem locations for downloads and archives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
    /// Remove both directories when the server shuts down.
    #[serde(default = "default_cleanup_on_shutdown")]
    pub cleanup_on_shutdown: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            archive_dir: default_archive_dir(),
            cleanup_on_shutdown: default_cleanup_on_shutdown(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("archives")
}

fn default_cleanup_on_shutdown() -> bool {
    true
}

/// Outbound HTTP client configuration (downloads and reachability probes)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
