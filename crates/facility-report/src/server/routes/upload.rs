//! Report upload endpoint
//!
//! `POST /upload` runs the whole workflow sequentially: download the
//! spreadsheet, extract the fixed field block, resolve the uploader's admin
//! hierarchy, append the composed record to the data collection, then delete
//! the source object best-effort.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::config::DeletionFailurePolicy;
use crate::error::{Error, Result};
use crate::ingestion::{extract_report, fetch_first_sheet, source_url};
use crate::providers::DocumentDb;
use crate::server::state::AppState;
use crate::types::report::{AdminRefs, ReportDocument};
use crate::types::{UploadRequest, UploadResponse};

const DELETION_OK: &str = "File successfully deleted.";
const DELETION_FAILED: &str = "Failed to delete file.";

/// POST /upload - ingest one report spreadsheet
pub async fn upload_report(
    State(state): State<AppState>,
    Json(body): Json<UploadRequest>,
) -> Result<Json<UploadResponse>> {
    let (url, current_month) = body.required()?;

    let sheet = fetch_first_sheet(state.http(), url).await?;
    let fields = extract_report(&sheet)?;

    let user_id = body
        .user_id
        .clone()
        .or_else(|| source_url::extract_user_id(url));

    let (facility_admin, admin_refs) = match user_id.as_deref() {
        Some(id) => {
            let facility_admin = state.documents().user_ref(id);
            let admin_refs = resolve_admin_refs(state.documents().as_ref(), id).await;
            (Some(facility_admin), admin_refs)
        }
        None => {
            tracing::warn!("No user id in request body or source URL; storing report without admin references");
            (None, AdminRefs::default())
        }
    };

    let report = ReportDocument {
        fields,
        facility_admin,
        admin_refs,
        current_month: current_month.to_string(),
        timestamp: Utc::now(),
    };

    // The write is the primary side effect; any failure past this point must
    // not undo it or change the returned document id.
    let document_id = state.documents().insert_report(&report).await?;
    tracing::info!(
        "Report for {} stored as document {}",
        report.current_month,
        document_id
    );

    let deletion_status = cleanup_source_object(&state, url).await?;

    Ok(Json(UploadResponse {
        message: "Data successfully uploaded".to_string(),
        document_id,
        deletion_status: Some(deletion_status),
    }))
}

/// Fetch the admin hierarchy for a facility admin, degrading to an empty
/// bundle on any failure. Reference resolution is never fatal.
async fn resolve_admin_refs(db: &dyn DocumentDb, user_id: &str) -> AdminRefs {
    match db.fetch_admin_refs(user_id).await {
        Ok(Some(refs)) => refs,
        Ok(None) => {
            tracing::warn!("Facility admin document {} does not exist", user_id);
            AdminRefs::default()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch admin references for {}: {}", user_id, e);
            AdminRefs::default()
        }
    }
}

/// Delete the uploaded spreadsheet from storage, best-effort.
///
/// Deletion errors never fail the request. A source URL that does not match
/// the expected storage shape is handled per the configured policy: reported
/// in the response by default, or returned as a 400 when set to `fail`.
async fn cleanup_source_object(state: &AppState, url: &str) -> Result<String> {
    let Some(path) = source_url::object_path(url) else {
        tracing::warn!("Could not parse storage object path from {}", url);
        return match state.config().upload.deletion_failure {
            DeletionFailurePolicy::Degrade => Ok(DELETION_FAILED.to_string()),
            DeletionFailurePolicy::Fail => Err(Error::validation("Invalid URL format")),
        };
    };

    match state.storage().delete(&path).await {
        Ok(()) => Ok(DELETION_OK.to_string()),
        Err(e) => {
            tracing::warn!("Failed to delete {}: {}", path, e);
            Ok(DELETION_FAILED.to_string())
        }
    }
}
