//! Identifier and object-path parsing out of download URLs
//!
//! Download URLs carry the storage object path percent-encoded, e.g.
//! `https://firebasestorage.googleapis.com/v0/b/<bucket>/o/users%2Fabc%2Freport.xlsx?alt=media&...`.
//! These are the only two places URL-shape assumptions live.

use regex::Regex;

/// Extract the uploading user's id from a `users%2F<id>` path segment.
///
/// Returns `None` when the URL does not match; callers treat that as "no
/// facility admin", never as an error.
pub fn extract_user_id(url: &str) -> Option<String> {
    let pattern = Regex::new(r"/users%2F([^%]+)").expect("Invalid regex");
    pattern
        .captures(url)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty())
}

/// Extract the bucket-relative object path from a download URL.
///
/// Matches `/o/<encoded-path>?alt=media` and decodes percent-encoded
/// slashes. Returns `None` when the URL has a different shape.
pub fn object_path(url: &str) -> Option<String> {
    let pattern = Regex::new(r"/o/(.+)\?alt=media").expect("Invalid regex");
    pattern
        .captures(url)
        .map(|caps| caps[1].replace("%2F", "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNLOAD_URL: &str = "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/users%2Fabc123%2Freports%2Fmarch.xlsx?alt=media&token=xyz";

    #[test]
    fn test_extract_user_id() {
        assert_eq!(extract_user_id(DOWNLOAD_URL).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_user_id_no_match() {
        assert_eq!(extract_user_id("https://example.com/report.xlsx"), None);
        assert_eq!(extract_user_id("https://example.com/users/abc123"), None);
    }

    #[test]
    fn test_object_path_decodes_slashes() {
        assert_eq!(
            object_path(DOWNLOAD_URL).as_deref(),
            Some("users/abc123/reports/march.xlsx")
        );
    }

    #[test]
    fn test_object_path_requires_alt_media() {
        assert_eq!(
            object_path("https://firebasestorage.googleapis.com/v0/b/demo/o/file.xlsx"),
            None
        );
        assert_eq!(object_path("https://example.com/report.xlsx"), None);
    }
}
