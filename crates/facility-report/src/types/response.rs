//! Upload response body

use serde::{Deserialize, Serialize};

/// Successful response of `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Human-readable outcome
    pub message: String,
    /// Id of the newly created data document
    pub document_id: String,
    /// Outcome of the best-effort source file deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_status: Option<String>,
}
