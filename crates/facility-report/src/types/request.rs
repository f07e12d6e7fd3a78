//! Upload request body

use serde::Deserialize;

use crate::error::{Error, Result};

/// Body of `POST /upload`.
///
/// Accepts both historical body shapes through aliases:
/// `{"url", "currentMonth"}` and `{"file_url", "current_month", "user_id"}`.
/// Fields are optional at the serde layer so that a missing field produces
/// the endpoint's own 400 message instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadRequest {
    /// Download URL of the uploaded spreadsheet
    #[serde(default, alias = "file_url")]
    pub url: Option<String>,
    /// Month label the report covers
    #[serde(default, rename = "currentMonth", alias = "current_month")]
    pub current_month: Option<String>,
    /// Facility admin id; when absent it is parsed out of the URL
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

impl UploadRequest {
    /// Validate required fields, returning `(url, current_month)`
    pub fn required(&self) -> Result<(&str, &str)> {
        match (self.url.as_deref(), self.current_month.as_deref()) {
            (Some(url), Some(month)) if !url.is_empty() && !month.is_empty() => Ok((url, month)),
            _ => Err(Error::MissingField("'url' or 'currentMonth'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_a_shape() {
        let req: UploadRequest =
            serde_json::from_str(r#"{"url": "https://x/y.xlsx", "currentMonth": "March"}"#)
                .unwrap();
        let (url, month) = req.required().unwrap();
        assert_eq!(url, "https://x/y.xlsx");
        assert_eq!(month, "March");
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_variant_b_shape() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"user_id": "abc123", "file_url": "https://x/y.xlsx", "current_month": "March"}"#,
        )
        .unwrap();
        let (url, month) = req.required().unwrap();
        assert_eq!(url, "https://x/y.xlsx");
        assert_eq!(month, "March");
        assert_eq!(req.user_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let req: UploadRequest =
            serde_json::from_str(r#"{"currentMonth": "March"}"#).unwrap();
        let err = req.required().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing 'url' or 'currentMonth' in request body"
        );

        let req: UploadRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.required().is_err());
    }
}
