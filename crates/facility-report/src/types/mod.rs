//! Core types for the upload service

pub mod report;
pub mod request;
pub mod response;

pub use report::{AdminRefs, DocRef, ReportDocument, ReportField, ReportFields, REPORT_FIELD_COUNT};
pub use request::UploadRequest;
pub use response::UploadResponse;
