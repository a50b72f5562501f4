//! Task orchestrator implementation.
//!
//! Drives tasks through their lifecycle:
//! - Creation: admission-controlled, ids assigned monotonically
//! - Attachment: validated under the task lock; the filling attachment queues the task
//! - Processing: bounded concurrent downloads, then one archive per task

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::archiver::Archiver;
use crate::downloader::Downloader;
use crate::metrics;
use crate::task::{File, FileStatus, Task, TaskId, TaskStatus, TaskStore};
use crate::validator::UrlValidator;
use crate::worker::TaskQueue;

use super::admission::AdmissionControl;
use super::config::OrchestratorConfig;
use super::gate::CountingGate;
use super::locks::TaskLocks;
use super::types::{AttachedFile, FileRejection, OrchestratorError, ProcessSummary, TaskStatusView};
use super::validation::{can_add_file, check_extension, check_url};

/// Result of one download unit, keyed by the file's index in the task.
enum UnitOutcome {
    Downloaded(PathBuf),
    Failed(String),
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The task orchestrator.
///
/// Owns the admission counter, the id counter, the per-task lock registry and
/// the producer side of the ready-task queue. Independent instances share
/// nothing.
pub struct TaskOrchestrator {
    config: OrchestratorConfig,
    store: Arc<dyn TaskStore>,
    downloader: Arc<dyn Downloader>,
    archiver: Arc<dyn Archiver>,
    validator: Arc<dyn UrlValidator>,
    queue: TaskQueue,
    admission: AdmissionControl,
    locks: TaskLocks,
    next_id: AtomicU64,
}

impl TaskOrchestrator {
    /// Create a new orchestrator pushing ready tasks onto `queue`.
    pub fn new(
        config: OrchestratorConfig,
        store: Arc<dyn TaskStore>,
        downloader: Arc<dyn Downloader>,
        archiver: Arc<dyn Archiver>,
        validator: Arc<dyn UrlValidator>,
        queue: TaskQueue,
    ) -> Self {
        let admission = AdmissionControl::new(config.max_active_tasks);
        Self {
            config,
            store,
            downloader,
            archiver,
            validator,
            queue,
            admission,
            locks: TaskLocks::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Number of tasks currently accepted or in progress.
    pub fn active_tasks(&self) -> u64 {
        self.admission.active()
    }

    /// Close the ready-task queue. Returns true on the closing call.
    pub fn close_queue(&self) -> bool {
        self.queue.close()
    }

    /// Create a new task, subject to the active-task limit.
    pub fn create_task(&self) -> Result<TaskId, OrchestratorError> {
        if !self.admission.try_acquire() {
            metrics::ADMISSIONS_REJECTED.inc();
            warn!(
                max = self.admission.max(),
                "Task creation rejected: active task limit reached"
            );
            return Err(OrchestratorError::AdmissionRejected {
                max: self.admission.max(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let task = Task::new(
            id,
            self.config.max_files_per_task,
            self.config.archive_path(id),
            self.config.archive_url(id),
        );

        if let Err(e) = self.store.save(task) {
            self.admission.release();
            self.update_active_gauge();
            error!(task_id = id, error = %e, "Failed to save new task");
            return Err(e.into());
        }

        metrics::TASKS_CREATED.inc();
        self.update_active_gauge();
        info!(task_id = id, active = self.admission.active(), "Task created");
        Ok(id)
    }

    /// Attach a file to a task.
    ///
    /// Validation failures are recorded on the file and reported in the
    /// returned [`AttachedFile`]; they do not fail the call. The attachment
    /// that fills the task queues it for processing once the task lock is
    /// released, waiting while the queue is full. During shutdown that push
    /// can fail with [`OrchestratorError::QueueClosed`]; the file stays
    /// recorded and the full task is never processed.
    pub async fn add_file(&self, id: TaskId, url: &str) -> Result<AttachedFile, OrchestratorError> {
        let max = self.config.max_files_per_task;
        let lock = self.lock_existing(id)?;

        let (status, rejection, filled) = {
            let _guard = lock.lock().await;
            let mut task = self.store.get(id)?;
            if task.status == TaskStatus::Completed {
                self.locks.evict(id);
            }

            if !can_add_file(task.files.len(), max) {
                debug!(task_id = id, url, "File rejected: task is full");
                return Err(OrchestratorError::FileLimitExceeded { task_id: id, max });
            }
            if task.status != TaskStatus::Accepted {
                return Err(OrchestratorError::AlreadyProcessed {
                    task_id: id,
                    status: task.status,
                });
            }

            let rejection = self.validate(url).await.err();
            let status = rejection
                .as_ref()
                .map(FileRejection::status)
                .unwrap_or(FileStatus::Accepted);

            task.files.push(File::new(url, status));
            task.updated_at = Utc::now();
            let filled = task.files.len() == max;
            self.store.save(task)?;

            (status, rejection, filled)
        };

        metrics::FILES_ATTACHED
            .with_label_values(&[status.as_str()])
            .inc();
        match &rejection {
            Some(reason) => warn!(task_id = id, %reason, "File attached with rejection"),
            None => debug!(task_id = id, url, "File accepted"),
        }

        if filled {
            self.queue.push(id).await.map_err(|_| {
                error!(task_id = id, "Task is full but the work queue is closed");
                OrchestratorError::QueueClosed(id)
            })?;
            info!(task_id = id, "Task queued for processing");
        }

        Ok(AttachedFile {
            status,
            rejection,
            queued: filled,
        })
    }

    /// Process a queued task: download its accepted files, archive them, and
    /// mark the task completed.
    ///
    /// Holds the task lock for the whole run. Per-file failures (errors or
    /// panics) mark only that file failed. An archive failure is logged and
    /// the task still completes.
    pub async fn process_task(&self, id: TaskId) -> Result<ProcessSummary, OrchestratorError> {
        let started = Instant::now();
        let lock = self.lock_existing(id)?;
        let _guard = lock.lock().await;

        let mut task = self.store.get(id)?;
        if task.status == TaskStatus::Completed {
            self.locks.evict(id);
        }
        if !task.advance(TaskStatus::InProgress) {
            return Err(OrchestratorError::AlreadyProcessed {
                task_id: id,
                status: task.status,
            });
        }
        self.store.save(task.clone())?;
        info!(task_id = id, files = task.files.len(), "Processing task");

        let mut summary = ProcessSummary {
            skipped: task.files.len() - task.pending_files(),
            ..Default::default()
        };

        let outcomes = self.download_pending(&task).await;
        for (index, outcome) in outcomes {
            let Some(file) = task.files.get_mut(index) else {
                continue;
            };
            match outcome {
                UnitOutcome::Downloaded(path) => {
                    debug!(task_id = id, url = %file.url, path = %path.display(), "File downloaded");
                    file.status = FileStatus::Completed;
                    summary.downloaded += 1;
                    metrics::DOWNLOADS.with_label_values(&["completed"]).inc();
                }
                UnitOutcome::Failed(reason) => {
                    warn!(task_id = id, url = %file.url, %reason, "Download failed");
                    file.status = FileStatus::Failed;
                    summary.failed += 1;
                    metrics::DOWNLOADS.with_label_values(&["failed"]).inc();
                }
            }
        }

        // A unit whose outcome never came back counts as failed.
        for file in task.files.iter_mut().filter(|f| f.status.is_pending()) {
            warn!(task_id = id, url = %file.url, "Download unit lost");
            file.status = FileStatus::Failed;
            summary.failed += 1;
            metrics::DOWNLOADS.with_label_values(&["failed"]).inc();
        }

        let source_dir = self.config.task_download_dir(id);
        match self
            .archiver
            .archive_directory(&source_dir, &task.archive_path)
            .await
        {
            Ok(()) => {
                summary.archived = true;
                debug!(task_id = id, path = %task.archive_path.display(), "Archive written");
            }
            Err(e) => {
                metrics::ARCHIVE_FAILURES.inc();
                error!(task_id = id, error = %e, "Failed to archive task");
            }
        }

        task.advance(TaskStatus::Completed);
        self.store.save(task)?;

        self.admission.release();
        self.update_active_gauge();
        self.locks.evict(id);

        metrics::TASKS_COMPLETED.inc();
        metrics::TASK_PROCESSING_DURATION
            .with_label_values(&[])
            .observe(started.elapsed().as_secs_f64());
        info!(
            task_id = id,
            downloaded = summary.downloaded,
            failed = summary.failed,
            skipped = summary.skipped,
            archived = summary.archived,
            "Task completed"
        );

        Ok(summary)
    }

    /// Current status of a task. The archive URL is present once the task is
    /// full or completed.
    pub fn task_status(&self, id: TaskId) -> Result<TaskStatusView, OrchestratorError> {
        let task = self.store.get(id)?;
        let ready = task.files.len() >= self.config.max_files_per_task
            || task.status == TaskStatus::Completed;

        Ok(TaskStatusView {
            status: task.status,
            archive_url: ready.then_some(task.archive_url),
        })
    }

    /// Archive path of a completed task.
    pub fn archive_location(&self, id: TaskId) -> Result<PathBuf, OrchestratorError> {
        let task = self.store.get(id)?;
        if task.status != TaskStatus::Completed {
            return Err(OrchestratorError::ArchiveNotReady(id));
        }
        Ok(task.archive_path)
    }

    /// Lock entry for a task known to the store.
    ///
    /// Unknown ids never get an entry. A task that completes between the
    /// lookup and the lock gets a fresh entry, which the caller evicts once it
    /// sees the Completed status.
    fn lock_existing(&self, id: TaskId) -> Result<Arc<AsyncMutex<()>>, OrchestratorError> {
        self.store.get(id)?;
        Ok(self.locks.lock_for(id))
    }

    /// Run the attach-time checks in order, stopping at the first failure.
    async fn validate(&self, url: &str) -> Result<(), FileRejection> {
        let parsed = check_url(url)?;
        check_extension(&parsed, &self.config.allowed_extensions)?;
        if !self.validator.is_reachable(url).await {
            return Err(FileRejection::NotReachable(url.to_string()));
        }
        Ok(())
    }

    /// Download every pending file of `task`, at most `max_files_per_task`
    /// at a time. Returns one outcome per spawned unit.
    async fn download_pending(&self, task: &Task) -> Vec<(usize, UnitOutcome)> {
        let gate = CountingGate::new(self.config.max_files_per_task);
        let mut units = JoinSet::new();

        for (index, file) in task.files.iter().enumerate() {
            if !file.status.is_pending() {
                continue;
            }

            let gate = gate.clone();
            let downloader = Arc::clone(&self.downloader);
            let url = file.url.clone();
            let task_id = task.id;

            units.spawn(async move {
                let unit = async {
                    let _permit = gate.acquire().await.map_err(|e| e.to_string())?;
                    downloader
                        .download_file(&url, task_id)
                        .await
                        .map_err(|e| e.to_string())
                };

                let outcome = match AssertUnwindSafe(unit).catch_unwind().await {
                    Ok(Ok(path)) => UnitOutcome::Downloaded(path),
                    Ok(Err(reason)) => UnitOutcome::Failed(reason),
                    Err(panic) => UnitOutcome::Failed(format!(
                        "download panicked: {}",
                        panic_message(panic.as_ref())
                    )),
                };
                (index, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(units.len());
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(result) => outcomes.push(result),
                Err(e) => error!(task_id = task.id, error = %e, "Download unit aborted"),
            }
        }
        outcomes
    }

    fn update_active_gauge(&self) {
        metrics::ACTIVE_TASKS.set(self.admission.active() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::InMemoryTaskStore;
    use crate::testing::{MockArchiver, MockDownloader, MockUrlValidator};
    use crate::worker::{task_queue, TaskReceiver};
    use std::time::Duration;

    struct Harness {
        orchestrator: Arc<TaskOrchestrator>,
        receiver: TaskReceiver,
        downloader: Arc<MockDownloader>,
        archiver: Arc<MockArchiver>,
        validator: Arc<MockUrlValidator>,
    }

    fn harness(max_active: u64, max_files: usize) -> Harness {
        let config = OrchestratorConfig {
            max_active_tasks: max_active,
            max_files_per_task: max_files,
            ..Default::default()
        };
        let downloader = Arc::new(MockDownloader::new());
        let archiver = Arc::new(MockArchiver::new());
        let validator = Arc::new(MockUrlValidator::new());
        let (queue, receiver) = task_queue(16);

        let orchestrator = Arc::new(TaskOrchestrator::new(
            config,
            Arc::new(InMemoryTaskStore::new()),
            downloader.clone(),
            archiver.clone(),
            validator.clone(),
            queue,
        ));

        Harness {
            orchestrator,
            receiver,
            downloader,
            archiver,
            validator,
        }
    }

    #[tokio::test]
    async fn test_create_task_assigns_increasing_ids() {
        let h = harness(3, 3);
        let a = h.orchestrator.create_task().unwrap();
        let b = h.orchestrator.create_task().unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(h.orchestrator.active_tasks(), 2);
    }

    #[tokio::test]
    async fn test_admission_limit() {
        let h = harness(2, 1);
        h.orchestrator.create_task().unwrap();
        h.orchestrator.create_task().unwrap();

        let err = h.orchestrator.create_task().unwrap_err();
        assert!(matches!(err, OrchestratorError::AdmissionRejected { max: 2 }));
        assert_eq!(h.orchestrator.active_tasks(), 2);
    }

    #[tokio::test]
    async fn test_completion_frees_admission_slot() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        assert!(h.orchestrator.create_task().is_err());

        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.process_task(id).await.unwrap();

        assert_eq!(h.orchestrator.active_tasks(), 0);
        assert!(h.orchestrator.create_task().is_ok());
    }

    #[tokio::test]
    async fn test_add_file_validation_order() {
        let h = harness(1, 4);
        let id = h.orchestrator.create_task().unwrap();
        h.validator.set_unreachable("https://x/gone.pdf").await;

        let ok = h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        assert_eq!(ok.status, FileStatus::Accepted);
        assert!(ok.rejection.is_none());

        let bad = h.orchestrator.add_file(id, "not-a-url").await.unwrap();
        assert_eq!(bad.status, FileStatus::InvalidUrl);

        let txt = h.orchestrator.add_file(id, "https://x/b.txt").await.unwrap();
        assert_eq!(txt.status, FileStatus::NotSupportedType);

        let gone = h.orchestrator.add_file(id, "https://x/gone.pdf").await.unwrap();
        assert_eq!(gone.status, FileStatus::NotReachable);
        assert!(matches!(gone.rejection, Some(FileRejection::NotReachable(_))));

        // Only URLs that passed the syntactic checks were probed.
        let probed = h.validator.probed_urls().await;
        assert_eq!(probed, vec!["https://x/a.pdf", "https://x/gone.pdf"]);
    }

    #[tokio::test]
    async fn test_add_file_unknown_task() {
        let h = harness(1, 3);
        let err = h.orchestrator.add_file(42, "https://x/a.pdf").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::TaskNotFound(42)));
    }

    #[tokio::test]
    async fn test_filling_attachment_queues_once() {
        let h = harness(1, 2);
        let id = h.orchestrator.create_task().unwrap();

        let first = h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        assert!(!first.queued);
        let second = h.orchestrator.add_file(id, "https://x/b.pdf").await.unwrap();
        assert!(second.queued);

        let err = h.orchestrator.add_file(id, "https://x/c.pdf").await.unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::FileLimitExceeded { task_id, max: 2 } if task_id == id
        ));

        assert_eq!(h.receiver.recv().await, Some(id));
        h.orchestrator.close_queue();
        assert_eq!(h.receiver.recv().await, None);
    }

    #[tokio::test]
    async fn test_add_file_after_queue_closed() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        h.orchestrator.close_queue();

        let err = h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::QueueClosed(q) if q == id));
    }

    #[tokio::test]
    async fn test_process_task_marks_files() {
        let h = harness(1, 3);
        let id = h.orchestrator.create_task().unwrap();
        h.downloader.fail_url("https://x/broken.pdf").await;

        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.add_file(id, "https://x/broken.pdf").await.unwrap();
        h.orchestrator.add_file(id, "nope").await.unwrap();

        let summary = h.orchestrator.process_task(id).await.unwrap();
        assert_eq!(
            summary,
            ProcessSummary {
                downloaded: 1,
                failed: 1,
                skipped: 1,
                archived: true,
            }
        );

        let task = h.orchestrator.store.get(id).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        let statuses: Vec<_> = task.files.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![FileStatus::Completed, FileStatus::Failed, FileStatus::InvalidUrl]
        );

        let archives = h.archiver.recorded_archives().await;
        assert_eq!(archives.len(), 1);
        assert!(archives[0].source_dir.ends_with("task-1"));
        assert!(archives[0].destination.ends_with("task-1.zip"));
    }

    #[tokio::test]
    async fn test_download_panic_only_fails_that_file() {
        let h = harness(1, 2);
        let id = h.orchestrator.create_task().unwrap();
        h.downloader.panic_on("https://x/boom.pdf").await;

        h.orchestrator.add_file(id, "https://x/boom.pdf").await.unwrap();
        h.orchestrator.add_file(id, "https://x/fine.pdf").await.unwrap();

        let summary = h.orchestrator.process_task(id).await.unwrap();
        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.failed, 1);

        let task = h.orchestrator.store.get(id).unwrap();
        assert_eq!(task.files[0].status, FileStatus::Failed);
        assert_eq!(task.files[1].status, FileStatus::Completed);
    }

    #[tokio::test]
    async fn test_archive_failure_still_completes() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        h.archiver.set_fail(true).await;
        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();

        let summary = h.orchestrator.process_task(id).await.unwrap();
        assert!(!summary.archived);

        let view = h.orchestrator.task_status(id).unwrap();
        assert_eq!(view.status, TaskStatus::Completed);
        assert!(view.archive_url.is_some());
        assert_eq!(h.orchestrator.active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_process_twice_is_rejected() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.process_task(id).await.unwrap();

        let err = h.orchestrator.process_task(id).await.unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::AlreadyProcessed {
                status: TaskStatus::Completed,
                ..
            }
        ));
        assert_eq!(h.orchestrator.active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_add_file_after_processing_started() {
        let h = harness(1, 3);
        let id = h.orchestrator.create_task().unwrap();
        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.process_task(id).await.unwrap();

        let err = h.orchestrator.add_file(id, "https://x/b.pdf").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::AlreadyProcessed { .. }));
        assert_eq!(h.orchestrator.store.get(id).unwrap().files.len(), 1);
    }

    #[tokio::test]
    async fn test_process_unknown_task() {
        let h = harness(1, 1);
        let err = h.orchestrator.process_task(5).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::TaskNotFound(5)));
    }

    #[tokio::test]
    async fn test_downloads_bounded_by_file_cap() {
        let h = harness(1, 3);
        h.downloader
            .set_download_duration(Duration::from_millis(30))
            .await;
        let id = h.orchestrator.create_task().unwrap();
        for name in ["a", "b", "c"] {
            h.orchestrator
                .add_file(id, &format!("https://x/{name}.pdf"))
                .await
                .unwrap();
        }

        h.orchestrator.process_task(id).await.unwrap();
        assert_eq!(h.downloader.download_count().await, 3);
        assert!(h.downloader.max_in_flight() <= 3);
    }

    #[tokio::test]
    async fn test_task_status_archive_url() {
        let h = harness(1, 2);
        let id = h.orchestrator.create_task().unwrap();

        let view = h.orchestrator.task_status(id).unwrap();
        assert_eq!(view.status, TaskStatus::Accepted);
        assert!(view.archive_url.is_none());

        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        assert!(h.orchestrator.task_status(id).unwrap().archive_url.is_none());

        h.orchestrator.add_file(id, "https://x/b.pdf").await.unwrap();
        let view = h.orchestrator.task_status(id).unwrap();
        assert_eq!(view.status, TaskStatus::Accepted);
        assert_eq!(
            view.archive_url.as_deref(),
            Some("http://localhost:8080/api/v1/archives/task-1.zip")
        );

        assert!(matches!(
            h.orchestrator.task_status(99),
            Err(OrchestratorError::TaskNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_archive_location_requires_completion() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        assert!(matches!(
            h.orchestrator.archive_location(id),
            Err(OrchestratorError::ArchiveNotReady(_))
        ));

        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.process_task(id).await.unwrap();

        let path = h.orchestrator.archive_location(id).unwrap();
        assert!(path.ends_with("task-1.zip"));
    }

    #[tokio::test]
    async fn test_completion_evicts_task_lock() {
        let h = harness(2, 1);
        let a = h.orchestrator.create_task().unwrap();
        let _b = h.orchestrator.create_task().unwrap();
        h.orchestrator.add_file(a, "https://x/a.pdf").await.unwrap();
        assert_eq!(h.orchestrator.locks.len(), 1);

        h.orchestrator.process_task(a).await.unwrap();
        assert!(h.orchestrator.locks.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_leave_no_lock_entries() {
        let h = harness(1, 1);
        for id in 100..150 {
            assert!(matches!(
                h.orchestrator.add_file(id, "https://x/a.pdf").await,
                Err(OrchestratorError::TaskNotFound(_))
            ));
            assert!(matches!(
                h.orchestrator.process_task(id).await,
                Err(OrchestratorError::TaskNotFound(_))
            ));
        }
        assert!(h.orchestrator.locks.is_empty());
    }

    #[tokio::test]
    async fn test_calls_on_completed_task_leave_no_lock_entry() {
        let h = harness(1, 1);
        let id = h.orchestrator.create_task().unwrap();
        h.orchestrator.add_file(id, "https://x/a.pdf").await.unwrap();
        h.orchestrator.process_task(id).await.unwrap();

        assert!(h.orchestrator.add_file(id, "https://x/b.pdf").await.is_err());
        assert!(h.orchestrator.process_task(id).await.is_err());
        assert!(h.orchestrator.locks.is_empty());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(3_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
