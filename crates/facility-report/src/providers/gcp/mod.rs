//! Google Cloud Platform provider implementations
//!
//! Production backends for the provider traits:
//! - Firestore (REST) for user and report documents
//! - Google Cloud Storage (JSON API) for spreadsheet deletion
//! - Service-account OAuth2 with the credential held only in memory

mod auth;
mod firestore;
mod storage;

pub use auth::GcpAuth;
pub use firestore::FirestoreDb;
pub use storage::GcsStore;
