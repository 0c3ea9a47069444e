//! External catalog lookup

use crate::error::Result;
use async_trait::async_trait;

/// Free-text search against a third-party music catalog
///
/// Implementations return the service payload untouched. Any transport or
/// decoding failure is reported as `StowawayError::Upstream`.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<serde_json::Value>;
}
