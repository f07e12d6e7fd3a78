//! Configuration for the upload service

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding the base64-encoded service account JSON
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS_B64";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload endpoint behavior
    #[serde(default)]
    pub upload: UploadConfig,
    /// GCP configuration (required to run against real Firestore/GCS)
    #[serde(default)]
    pub gcp: Option<GcpConfig>,
}

impl AppConfig {
    /// Load configuration from a TOML file (if it exists) plus environment
    /// overrides. `PORT` overrides the listen port; the service account
    /// credential always comes from [`CREDENTIALS_ENV`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Ok(encoded) = std::env::var(CREDENTIALS_ENV) {
            self.gcp
                .get_or_insert_with(GcpConfig::default)
                .credentials_b64 = Some(encoded);
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

/// Upload endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// What to do when the storage path cannot be parsed out of the source URL
    #[serde(default)]
    pub deletion_failure: DeletionFailurePolicy,
    /// Collection holding facility admin (user) documents
    #[serde(default = "default_users_collection")]
    pub users_collection: String,
    /// Collection receiving composed report documents
    #[serde(default = "default_data_collection")]
    pub data_collection: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            deletion_failure: DeletionFailurePolicy::default(),
            users_collection: default_users_collection(),
            data_collection: default_data_collection(),
        }
    }
}

fn default_users_collection() -> String {
    "users".to_string()
}

fn default_data_collection() -> String {
    "data".to_string()
}

/// Policy for a source URL whose storage object path cannot be parsed.
///
/// The record write has already succeeded by the time deletion runs, so
/// `Degrade` (the default) keeps the 200 response and reports the failure in
/// `deletionStatus`. `Fail` turns the parse failure into a 400.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionFailurePolicy {
    /// Report the failure in the response message, keep HTTP 200
    #[default]
    Degrade,
    /// Return a 400 to the caller
    Fail,
}

/// Google Cloud Platform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GcpConfig {
    /// GCP project ID (falls back to the service account's project)
    #[serde(default)]
    pub project_id: Option<String>,
    /// Storage bucket holding uploaded spreadsheets
    #[serde(default)]
    pub storage_bucket: String,
    /// Base64-encoded service account JSON (from the environment, not the file)
    #[serde(skip)]
    pub credentials_b64: Option<String>,
}
