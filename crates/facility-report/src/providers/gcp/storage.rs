//! Google Cloud Storage object deletion via the JSON API

use async_trait::async_trait;
use std::sync::Arc;

use super::auth::GcpAuth;
use crate::error::{Error, Result};
use crate::providers::object_store::ObjectStore;

const STORAGE_BASE: &str = "https://storage.googleapis.com/storage/v1";

/// Google Cloud Storage object store
pub struct GcsStore {
    auth: Arc<GcpAuth>,
    bucket: String,
}

impl GcsStore {
    pub fn new(auth: Arc<GcpAuth>, bucket: String) -> Self {
        Self { auth, bucket }
    }

    /// Object URL with the bucket-relative path percent-encoded
    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/b/{}/o/{}",
            STORAGE_BASE,
            self.bucket,
            urlencoding::encode(path)
        )
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn delete(&self, path: &str) -> Result<()> {
        let client = self.auth.authorized_client().await?;
        let response = client
            .delete(self.object_url(path))
            .send()
            .await
            .map_err(|e| Error::object_store(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::object_store(format!(
                "Failed to delete gs://{}/{} ({}): {}",
                self.bucket, path, status, body
            )));
        }

        tracing::debug!("Deleted gs://{}/{}", self.bucket, path);
        Ok(())
    }

    fn name(&self) -> &str {
        "gcs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_encodes_slashes() {
        let auth = Arc::new(
            GcpAuth::from_json(
                r#"{
                    "client_email": "svc@demo.iam.gserviceaccount.com",
                    "private_key": "",
                    "token_uri": "https://oauth2.googleapis.com/token"
                }"#,
            )
            .unwrap(),
        );
        let store = GcsStore::new(auth, "demo-bucket".to_string());

        assert_eq!(
            store.object_url("users/abc/report.xlsx"),
            "https://storage.googleapis.com/storage/v1/b/demo-bucket/o/users%2Fabc%2Freport.xlsx"
        );
    }
}
