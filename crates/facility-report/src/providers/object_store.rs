//! Object storage provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the storage bucket holding uploaded spreadsheets.
///
/// Implementations:
/// - `GcsStore`: Google Cloud Storage JSON API
/// - `MemoryObjectStore`: in-memory store for tests
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Delete an object by bucket-relative path
    async fn delete(&self, path: &str) -> Result<()>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
