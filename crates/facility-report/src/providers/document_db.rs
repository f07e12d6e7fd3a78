//! Document database provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::report::{AdminRefs, DocRef, ReportDocument};

/// Trait for the document database holding users and report data.
///
/// Implementations:
/// - `FirestoreDb`: Firestore REST API
/// - `MemoryDocumentDb`: in-memory store for tests
#[async_trait]
pub trait DocumentDb: Send + Sync {
    /// Reference path for a facility admin (user) document
    fn user_ref(&self, user_id: &str) -> DocRef;

    /// Fetch the admin hierarchy references from a user document.
    ///
    /// Returns `Ok(None)` when the document does not exist; callers degrade
    /// to an empty bundle rather than failing the request.
    async fn fetch_admin_refs(&self, user_id: &str) -> Result<Option<AdminRefs>>;

    /// Append a composed report to the data collection.
    ///
    /// Always creates a new document with a generated id; two identical
    /// reports produce two documents. Returns the new document id.
    async fn insert_report(&self, report: &ReportDocument) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
