//! In-memory provider implementations for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::report::{AdminRefs, DocRef, ReportDocument};

use super::document_db::DocumentDb;
use super::object_store::ObjectStore;

/// In-memory document database
#[derive(Default)]
pub struct MemoryDocumentDb {
    users: Mutex<HashMap<String, AdminRefs>>,
    reports: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryDocumentDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user document with its admin hierarchy references
    pub fn insert_user(&self, user_id: impl Into<String>, refs: AdminRefs) {
        self.users.lock().insert(user_id.into(), refs);
    }

    /// Number of stored report documents
    pub fn report_count(&self) -> usize {
        self.reports.lock().len()
    }

    /// Fetch a stored report document by id
    pub fn report(&self, document_id: &str) -> Option<serde_json::Value> {
        self.reports.lock().get(document_id).cloned()
    }

    /// Snapshot of all stored report documents
    pub fn reports(&self) -> Vec<(String, serde_json::Value)> {
        self.reports
            .lock()
            .iter()
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentDb for MemoryDocumentDb {
    fn user_ref(&self, user_id: &str) -> DocRef {
        DocRef(format!("/users/{}", user_id))
    }

    async fn fetch_admin_refs(&self, user_id: &str) -> Result<Option<AdminRefs>> {
        Ok(self.users.lock().get(user_id).cloned())
    }

    async fn insert_report(&self, report: &ReportDocument) -> Result<String> {
        let document_id = Uuid::new_v4().simple().to_string();
        self.reports
            .lock()
            .insert(document_id.clone(), report.to_json());
        Ok(document_id)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// In-memory object store
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object at the given path
    pub fn insert_object(&self, path: impl Into<String>, data: Vec<u8>) {
        self.objects.lock().insert(path.into(), data);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().contains_key(path)
    }

    /// Paths deleted so far, in order
    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn delete(&self, path: &str) -> Result<()> {
        if self.objects.lock().remove(path).is_none() {
            return Err(Error::object_store(format!("object not found: {}", path)));
        }
        self.deleted.lock().push(path.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
