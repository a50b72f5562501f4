//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected and a real zip archiver writing into a
//! temporary directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use zipper_core::{
    task_queue,
    testing::{MockDownloader, MockUrlValidator},
    Config, InMemoryTaskStore, OrchestratorConfig, TaskOrchestrator, WorkerPool, ZipArchiver,
};

/// Re-export fixtures for test convenience
pub use zipper_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock downloader - writes small files, can fail per URL
    pub downloader: Arc<MockDownloader>,
    /// Mock reachability probe
    pub validator: Arc<MockUrlValidator>,
    /// Running worker pool
    pub pool: WorkerPool,
    /// Temporary directory holding downloads and archives
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Response with the raw body, for non-JSON endpoints
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub max_active_tasks: u64,
    pub max_files_per_task: usize,
    pub workers: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            max_active_tasks: 3,
            max_files_per_task: 3,
            workers: 2,
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default limits.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom limits.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config: Config = fixtures::config_in(
            temp_dir.path(),
            test_config.max_active_tasks,
            test_config.max_files_per_task,
        );

        let downloader = Arc::new(MockDownloader::with_output_dir(
            config.storage.download_dir.clone(),
        ));
        let validator = Arc::new(MockUrlValidator::new());
        let (queue, receiver) = task_queue(config.workers.queue_capacity);

        let orchestrator = Arc::new(TaskOrchestrator::new(
            OrchestratorConfig::from(&config),
            Arc::new(InMemoryTaskStore::new()),
            Arc::clone(&downloader) as Arc<dyn zipper_core::Downloader>,
            Arc::new(ZipArchiver::new()),
            Arc::clone(&validator) as Arc<dyn zipper_core::UrlValidator>,
            queue,
        ));
        let pool = WorkerPool::start(Arc::clone(&orchestrator), receiver, test_config.workers);

        let state = Arc::new(zipper_server::state::AppState::new(orchestrator));
        let router = zipper_server::api::create_router(state);

        Self {
            router,
            downloader,
            validator,
            pool,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a GET request and keep the raw body.
    pub async fn get_raw(&self, path: &str) -> RawResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        RawResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a task and return its id.
    pub async fn create_task(&self) -> u64 {
        let response = self.post_empty("/api/v1/tasks").await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_u64().expect("id should be a number")
    }

    /// Attach a file to a task.
    pub async fn add_file(&self, id: u64, url: &str) -> TestResponse {
        self.post(
            &format!("/api/v1/tasks/{}/files", id),
            serde_json::json!({ "url": url }),
        )
        .await
    }

    /// Poll the task until it reports `status`.
    pub async fn wait_for_status(&self, id: u64, status: &str, timeout: Duration) -> bool {
        let start = std::time::Instant::now();
        while start.elapsed() < timeout {
            let response = self.get(&format!("/api/v1/tasks/{}", id)).await;
            if response.body["status"] == status {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
