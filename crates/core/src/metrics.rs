//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Admission (tasks created, rejected)
//! - File attachment outcomes
//! - Task processing (downloads, archiving, completion)
//! - Worker pool health

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Admission Metrics
// =============================================================================

/// Tasks created total.
pub static TASKS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("zipper_tasks_created_total", "Total tasks admitted").unwrap()
});

/// Task creations rejected because the active-task limit was reached.
pub static ADMISSIONS_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "zipper_admissions_rejected_total",
        "Total task creations rejected by admission control",
    )
    .unwrap()
});

/// Tasks currently accepted or in progress.
pub static ACTIVE_TASKS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("zipper_active_tasks", "Tasks currently accepted or in progress").unwrap()
});

// =============================================================================
// Attachment Metrics
// =============================================================================

/// Files attached by their validation outcome.
pub static FILES_ATTACHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("zipper_files_attached_total", "Total files attached to tasks"),
        &["status"], // "accepted", "invalid_url", "not_supported_type", "not_reachable"
    )
    .unwrap()
});

// =============================================================================
// Processing Metrics
// =============================================================================

/// Downloads by result.
pub static DOWNLOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("zipper_downloads_total", "Total file downloads attempted"),
        &["result"], // "completed", "failed"
    )
    .unwrap()
});

/// Archive failures total. The task still completes.
pub static ARCHIVE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "zipper_archive_failures_total",
        "Total archive writes that failed",
    )
    .unwrap()
});

/// Tasks completed total.
pub static TASKS_COMPLETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("zipper_tasks_completed_total", "Total tasks completed").unwrap()
});

/// Task processing duration in seconds (downloads + archive).
pub static TASK_PROCESSING_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "zipper_task_processing_duration_seconds",
            "Duration of task processing",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Worker Metrics
// =============================================================================

/// Panics caught while a worker processed a task.
pub static WORKER_PANICS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "zipper_worker_panics_total",
        "Total panics caught by the worker pool",
    )
    .unwrap()
});

/// Tasks that could not be processed (not found, already processed, store errors).
pub static PROCESSING_ERRORS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "zipper_processing_errors_total",
        "Total task processing calls that returned an error",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Admission
        Box::new(TASKS_CREATED.clone()),
        Box::new(ADMISSIONS_REJECTED.clone()),
        Box::new(ACTIVE_TASKS.clone()),
        // Attachment
        Box::new(FILES_ATTACHED.clone()),
        // Processing
        Box::new(DOWNLOADS.clone()),
        Box::new(ARCHIVE_FAILURES.clone()),
        Box::new(TASKS_COMPLETED.clone()),
        Box::new(TASK_PROCESSING_DURATION.clone()),
        // Workers
        Box::new(WORKER_PANICS.clone()),
        Box::new(PROCESSING_ERRORS.clone()),
    ]
}
