//! Mock URL validator for testing.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::validator::UrlValidator;

/// Mock implementation of the UrlValidator trait.
///
/// Every URL is reachable unless marked otherwise.
#[derive(Debug, Default)]
pub struct MockUrlValidator {
    unreachable: Arc<RwLock<HashSet<String>>>,
    probed: Arc<RwLock<Vec<String>>>,
}

impl MockUrlValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `url` answer as unreachable.
    pub async fn set_unreachable(&self, url: impl Into<String>) {
        self.unreachable.write().await.insert(url.into());
    }

    /// URLs probed so far, in call order.
    pub async fn probed_urls(&self) -> Vec<String> {
        self.probed.read().await.clone()
    }
}

#[async_trait]
impl UrlValidator for MockUrlValidator {
    async fn is_reachable(&self, url: &str) -> bool {
        self.probed.write().await.push(url.to_string());
        !self.unreachable.read().await.contains(url)
    }
}
