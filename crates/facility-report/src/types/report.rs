//! Report record types composed from the spreadsheet and the admin hierarchy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

/// Number of label/value rows the report template carries
pub const REPORT_FIELD_COUNT: usize = 10;

/// Opaque reference to another document in the store (a document path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocRef(pub String);

impl DocRef {
    /// The raw document path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocRef {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

/// One extracted label/value pair from the report template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    /// Indicator label (template column B)
    pub label: String,
    /// Reported count (template column H)
    pub value: i64,
}

/// The ten extracted report fields, in template row order.
///
/// An ordered list rather than a map: the template is not under our control
/// and a repeated label must not silently collapse two rows into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields(Vec<ReportField>);

impl ReportFields {
    /// Build from extracted pairs, enforcing the fixed row count
    pub fn new(fields: Vec<ReportField>) -> Result<Self> {
        if fields.len() != REPORT_FIELD_COUNT {
            return Err(Error::validation(format!(
                "Expected {} report fields, got {}",
                REPORT_FIELD_COUNT,
                fields.len()
            )));
        }
        Ok(Self(fields))
    }

    /// Iterate fields in template order
    pub fn iter(&self) -> impl Iterator<Item = &ReportField> {
        self.0.iter()
    }

    /// Look up the first field with the given label
    pub fn get(&self, label: &str) -> Option<i64> {
        self.0.iter().find(|f| f.label == label).map(|f| f.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The upward admin hierarchy references pulled from a facility admin document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRefs {
    /// Sub-district admin document
    pub sub_district: Option<DocRef>,
    /// District admin document
    pub district: Option<DocRef>,
    /// State admin document
    pub state: Option<DocRef>,
}

impl AdminRefs {
    pub fn is_empty(&self) -> bool {
        self.sub_district.is_none() && self.district.is_none() && self.state.is_none()
    }
}

/// The composed record appended to the data collection.
///
/// Write-once: created once per successful request, never updated or deleted
/// by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Extracted label/value pairs
    pub fields: ReportFields,
    /// Reference to the facility admin (user) who uploaded the report
    pub facility_admin: Option<DocRef>,
    /// Admin hierarchy references resolved from the facility admin document
    pub admin_refs: AdminRefs,
    /// Caller-supplied month label
    pub current_month: String,
    /// Client-computed UTC instant at composition time
    pub timestamp: DateTime<Utc>,
}

impl ReportDocument {
    /// Flatten into the stored document shape: each label at the top level,
    /// the reference fields under their canonical names, plus `currentMonth`
    /// and an RFC 3339 `timestamp`.
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        for field in self.fields.iter() {
            doc.insert(field.label.clone(), json!(field.value));
        }

        let doc_ref = |r: &Option<DocRef>| match r {
            Some(r) => json!(r.as_str()),
            None => Value::Null,
        };

        doc.insert("facilityAdminRef".to_string(), doc_ref(&self.facility_admin));
        doc.insert(
            "subDistrictAdminRef".to_string(),
            doc_ref(&self.admin_refs.sub_district),
        );
        doc.insert(
            "districtAdminRef".to_string(),
            doc_ref(&self.admin_refs.district),
        );
        doc.insert("stateAdminRef".to_string(), doc_ref(&self.admin_refs.state));
        doc.insert("currentMonth".to_string(), json!(self.current_month));
        doc.insert("timestamp".to_string(), json!(self.timestamp.to_rfc3339()));

        Value::Object(doc)
    }
}
