//! facility-report: HTTP service that ingests monthly facility report
//! spreadsheets into a document database.
//!
//! One endpoint does the whole job: download the uploaded Excel file, extract
//! the fixed block of indicator rows, resolve the uploading facility admin's
//! administrative hierarchy, append the composed record to the `data`
//! collection, and delete the source file from the storage bucket.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use server::Server;
pub use types::{ReportDocument, UploadRequest, UploadResponse};
