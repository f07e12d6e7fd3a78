//! Firestore document database via the REST API

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use super::auth::GcpAuth;
use crate::error::{Error, Result};
use crate::providers::document_db::DocumentDb;
use crate::types::report::{AdminRefs, DocRef, ReportDocument};

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

/// Firestore-backed document database
pub struct FirestoreDb {
    auth: Arc<GcpAuth>,
    project_id: String,
    users_collection: String,
    data_collection: String,
}

impl FirestoreDb {
    pub fn new(
        auth: Arc<GcpAuth>,
        project_id: String,
        users_collection: String,
        data_collection: String,
    ) -> Self {
        Self {
            auth,
            project_id,
            users_collection,
            data_collection,
        }
    }

    /// Root resource path of the default database
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }
}

#[async_trait]
impl DocumentDb for FirestoreDb {
    fn user_ref(&self, user_id: &str) -> DocRef {
        DocRef(format!(
            "{}/{}/{}",
            self.documents_root(),
            self.users_collection,
            user_id
        ))
    }

    async fn fetch_admin_refs(&self, user_id: &str) -> Result<Option<AdminRefs>> {
        let url = format!(
            "{}/{}/{}/{}",
            FIRESTORE_BASE,
            self.documents_root(),
            self.users_collection,
            user_id
        );

        let client = self.auth.authorized_client().await?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::document_db(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::document_db(format!(
                "Failed to fetch user {} ({}): {}",
                user_id, status, body
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| Error::document_db(e.to_string()))?;
        let fields = &document["fields"];

        Ok(Some(AdminRefs {
            sub_district: reference_field(fields, "subDistrictAdminRef"),
            district: reference_field(fields, "districtAdminRef"),
            state: reference_field(fields, "stateAdminRef"),
        }))
    }

    async fn insert_report(&self, report: &ReportDocument) -> Result<String> {
        let url = format!(
            "{}/{}/{}",
            FIRESTORE_BASE,
            self.documents_root(),
            self.data_collection
        );

        let body = json!({ "fields": encode_report(report) });

        let client = self.auth.authorized_client().await?;
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::document_db(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::document_db(format!(
                "Failed to create data document ({}): {}",
                status, body
            )));
        }

        let created: Value = response
            .json()
            .await
            .map_err(|e| Error::document_db(e.to_string()))?;

        created["name"]
            .as_str()
            .and_then(document_id_from_name)
            .ok_or_else(|| Error::document_db("Create response carried no document name"))
    }

    fn name(&self) -> &str {
        "firestore"
    }
}

/// Encode a report into Firestore's typed field map
fn encode_report(report: &ReportDocument) -> Value {
    let mut fields = Map::new();

    for field in report.fields.iter() {
        // Firestore encodes integers as strings
        fields.insert(
            field.label.clone(),
            json!({ "integerValue": field.value.to_string() }),
        );
    }

    fields.insert(
        "facilityAdminRef".to_string(),
        encode_ref(&report.facility_admin),
    );
    fields.insert(
        "subDistrictAdminRef".to_string(),
        encode_ref(&report.admin_refs.sub_district),
    );
    fields.insert(
        "districtAdminRef".to_string(),
        encode_ref(&report.admin_refs.district),
    );
    fields.insert(
        "stateAdminRef".to_string(),
        encode_ref(&report.admin_refs.state),
    );
    fields.insert(
        "currentMonth".to_string(),
        json!({ "stringValue": report.current_month }),
    );
    fields.insert(
        "timestamp".to_string(),
        json!({ "timestampValue": report.timestamp.to_rfc3339() }),
    );

    Value::Object(fields)
}

/// Encode an optional document reference.
///
/// Full resource names become `referenceValue`; anything else is stored
/// verbatim as a string so opaque paths from other backends survive.
fn encode_ref(doc_ref: &Option<DocRef>) -> Value {
    match doc_ref {
        Some(r) if r.as_str().starts_with("projects/") => {
            json!({ "referenceValue": r.as_str() })
        }
        Some(r) => json!({ "stringValue": r.as_str() }),
        None => json!({ "nullValue": null }),
    }
}

/// Read a reference-like field from a fetched document's typed field map
fn reference_field(fields: &Value, name: &str) -> Option<DocRef> {
    let field = fields.get(name)?;
    field["referenceValue"]
        .as_str()
        .or_else(|| field["stringValue"].as_str())
        .map(DocRef::from)
}

/// Trailing path segment of a full document resource name
fn document_id_from_name(name: &str) -> Option<String> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{ReportField, ReportFields, REPORT_FIELD_COUNT};
    use chrono::Utc;

    fn sample_report() -> ReportDocument {
        let fields = ReportFields::new(
            (0..REPORT_FIELD_COUNT)
                .map(|i| ReportField {
                    label: format!("indicator_{}", i),
                    value: i as i64 * 7,
                })
                .collect(),
        )
        .unwrap();

        ReportDocument {
            fields,
            facility_admin: Some(DocRef::from(
                "projects/demo/databases/(default)/documents/users/abc123",
            )),
            admin_refs: AdminRefs {
                district: Some(DocRef::from("/districts/5")),
                ..Default::default()
            },
            current_month: "March".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_encode_report_typed_fields() {
        let encoded = encode_report(&sample_report());

        assert_eq!(encoded["indicator_2"]["integerValue"], "14");
        assert_eq!(
            encoded["facilityAdminRef"]["referenceValue"],
            "projects/demo/databases/(default)/documents/users/abc123"
        );
        // Opaque path, not a full resource name
        assert_eq!(encoded["districtAdminRef"]["stringValue"], "/districts/5");
        assert!(encoded["subDistrictAdminRef"]["nullValue"].is_null());
        assert_eq!(encoded["currentMonth"]["stringValue"], "March");
        assert!(encoded["timestamp"]["timestampValue"].is_string());
    }

    #[test]
    fn test_reference_field_accepts_both_encodings() {
        let fields = json!({
            "districtAdminRef": { "referenceValue": "projects/p/databases/(default)/documents/districts/5" },
            "stateAdminRef": { "stringValue": "/states/1" },
            "other": { "integerValue": "3" },
        });

        assert_eq!(
            reference_field(&fields, "districtAdminRef").unwrap().as_str(),
            "projects/p/databases/(default)/documents/districts/5"
        );
        assert_eq!(
            reference_field(&fields, "stateAdminRef").unwrap().as_str(),
            "/states/1"
        );
        assert!(reference_field(&fields, "subDistrictAdminRef").is_none());
        assert!(reference_field(&fields, "other").is_none());
    }

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id_from_name(
                "projects/demo/databases/(default)/documents/data/AbC123xyz"
            )
            .as_deref(),
            Some("AbC123xyz")
        );
        assert!(document_id_from_name("").is_none());
    }
}
