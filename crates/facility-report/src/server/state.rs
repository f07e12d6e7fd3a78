//! Application state for the upload server

use std::sync::Arc;

use crate::config::{AppConfig, CREDENTIALS_ENV};
use crate::error::{Error, Result};
use crate::providers::gcp::{FirestoreDb, GcpAuth, GcsStore};
use crate::providers::{DocumentDb, ObjectStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Shared HTTP client for spreadsheet downloads
    http: reqwest::Client,
    /// Document database (users + data collections)
    documents: Arc<dyn DocumentDb>,
    /// Object storage holding uploaded spreadsheets
    storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Create state backed by Firestore and GCS, constructed from the
    /// base64-encoded service account credential in the configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        let gcp = config
            .gcp
            .as_ref()
            .ok_or_else(|| Error::Config("Missing [gcp] configuration".to_string()))?;

        let encoded = gcp.credentials_b64.as_ref().ok_or_else(|| {
            Error::Config(format!("{} is not set in the environment", CREDENTIALS_ENV))
        })?;
        let auth = Arc::new(GcpAuth::from_base64(encoded)?);

        let project_id = gcp
            .project_id
            .clone()
            .or_else(|| auth.project_id().map(String::from))
            .ok_or_else(|| {
                Error::Config(
                    "No project id in config or service account credential".to_string(),
                )
            })?;

        if gcp.storage_bucket.is_empty() {
            return Err(Error::Config(
                "gcp.storage_bucket must be configured".to_string(),
            ));
        }

        let documents: Arc<dyn DocumentDb> = Arc::new(FirestoreDb::new(
            Arc::clone(&auth),
            project_id,
            config.upload.users_collection.clone(),
            config.upload.data_collection.clone(),
        ));
        let storage: Arc<dyn ObjectStore> =
            Arc::new(GcsStore::new(auth, gcp.storage_bucket.clone()));

        Ok(Self::with_providers(config, documents, storage))
    }

    /// Create state with explicit providers (dependency injection seam)
    pub fn with_providers(
        config: AppConfig,
        documents: Arc<dyn DocumentDb>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        tracing::info!(
            "Application state initialized (documents: {}, storage: {})",
            documents.name(),
            storage.name()
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                http: reqwest::Client::new(),
                documents,
                storage,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the shared HTTP client
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Get the document database provider
    pub fn documents(&self) -> &Arc<dyn DocumentDb> {
        &self.inner.documents
    }

    /// Get the object storage provider
    pub fn storage(&self) -> &Arc<dyn ObjectStore> {
        &self.inner.storage
    }
}
