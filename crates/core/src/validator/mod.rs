//! URL reachability probing.

mod http;

pub use http::HttpUrlValidator;

use async_trait::async_trait;

/// Answers whether a URL currently serves content.
#[async_trait]
pub trait UrlValidator: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}
