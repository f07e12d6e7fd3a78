//! Remote spreadsheet retrieval

use calamine::{Data, Range, Reader};
use std::io::Cursor;

use crate::error::{Error, Result};

/// Download the spreadsheet at `url` and return its first sheet.
///
/// Any transport failure or non-2xx status is fatal for the request; there
/// are no retries. No size or content-type validation beyond the workbook
/// parsing itself.
pub async fn fetch_first_sheet(client: &reqwest::Client, url: &str) -> Result<Range<Data>> {
    tracing::debug!("Downloading spreadsheet from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::fetch(e.to_string()))?
        .error_for_status()
        .map_err(|e| Error::fetch(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::fetch(e.to_string()))?;

    read_first_sheet(&bytes)
}

/// Parse workbook bytes and return the first sheet as an addressable range
pub fn read_first_sheet(data: &[u8]) -> Result<Range<Data>> {
    let cursor = Cursor::new(data.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::WorkbookParse(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::WorkbookParse("workbook has no sheets".to_string()))?;

    workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::WorkbookParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let err = read_first_sheet(b"not a workbook").unwrap_err();
        assert!(matches!(err, Error::WorkbookParse(_)));
    }
}
