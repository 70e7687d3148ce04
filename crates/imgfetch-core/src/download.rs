//! Single-stream HTTP GET of the full response body into memory.

use crate::error::{check_status, FetchError};
use std::time::Duration;

/// Redirect hops allowed before libcurl gives up.
const MAX_REDIRECTS: u32 = 10;

/// Downloads `url` with a single GET and returns the whole body.
///
/// Follows redirects. `timeout` bounds the entire transfer. Blocks the current thread.
pub fn download(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let err = |e| FetchError::curl("GET", url, e);
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(err)?;
    easy.follow_location(true).map_err(err)?;
    easy.max_redirections(MAX_REDIRECTS).map_err(err)?;
    easy.timeout(timeout).map_err(err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(err)?;
        transfer.perform().map_err(err)?;
    }

    let code = easy.response_code().map_err(err)?;
    check_status("GET", url, code)?;

    tracing::debug!(url, bytes = body.len(), "download ok");
    Ok(body)
}
