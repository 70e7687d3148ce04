//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers before committing
//! to a full download, so the pipeline can check `Content-Type` and
//! `Content-Length` against its policy.

mod parse;

use crate::error::{check_status, FetchError};
use std::str;
use std::time::Duration;

/// Result of a HEAD request: the headers the fetch policy looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// `Content-Type` value if present, verbatim (parameters included).
    pub content_type: Option<String>,
    /// Declared size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
}

impl ProbeResult {
    /// True if the declared content type is `image/*`. Absent counts as not an image.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(crate::url_model::is_image_content_type)
            .unwrap_or(false)
    }

    /// Content type for display; empty when the server sent none.
    pub fn content_type_display(&self) -> &str {
        self.content_type.as_deref().unwrap_or("")
    }
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects; headers of the final response win. Blocks the current thread.
pub fn probe(url: &str, timeout: Duration) -> Result<ProbeResult, FetchError> {
    let err = |e| FetchError::curl("HEAD", url, e);
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(err)?;
    easy.nobody(true).map_err(err)?; // HEAD request
    easy.follow_location(true).map_err(err)?;
    easy.timeout(timeout).map_err(err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(err)?;
        transfer.perform().map_err(err)?;
    }

    let code = easy.response_code().map_err(err)?;
    check_status("HEAD", url, code)?;

    let result = parse::parse_headers(&headers);
    tracing::debug!(
        url,
        content_type = ?result.content_type,
        content_length = ?result.content_length,
        "probe ok"
    );
    Ok(result)
}
