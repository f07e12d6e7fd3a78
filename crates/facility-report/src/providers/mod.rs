//! Provider abstractions for the document database and object storage
//!
//! Trait seams keep the upload workflow independent of the concrete backend:
//! Firestore/GCS in production, in-memory implementations in tests.

pub mod document_db;
pub mod gcp;
pub mod memory;
pub mod object_store;

pub use document_db::DocumentDb;
pub use object_store::ObjectStore;
