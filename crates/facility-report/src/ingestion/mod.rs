//! Spreadsheet ingestion: download, extraction, and source URL parsing

pub mod extractor;
pub mod fetcher;
pub mod source_url;

pub use extractor::extract_report;
pub use fetcher::{fetch_first_sheet, read_first_sheet};
