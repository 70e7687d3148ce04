//! Transport error type shared by the probe and the downloader.

use thiserror::Error;

/// A HEAD or GET that did not produce a usable 2xx response.
///
/// Kept separate from `anyhow` so the pipeline can tell transport failures
/// (reported as connection errors) from everything else.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl could not build or perform the request (bad URL, DNS, timeout, reset, ...).
    #[error("{method} {url}: {source}")]
    Curl {
        method: &'static str,
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The final response after redirects was not 2xx.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u32,
    },
}

impl FetchError {
    pub(crate) fn curl(method: &'static str, url: &str, source: curl::Error) -> Self {
        FetchError::Curl {
            method,
            url: url.to_string(),
            source,
        }
    }

    /// True when the failure was a timeout (probe or download).
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl { source, .. } if source.is_operation_timedout())
    }

    /// HTTP status for [`FetchError::Status`], else `None`.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Curl { .. } => None,
        }
    }
}

/// Map a response code to `Ok` for 2xx, else [`FetchError::Status`].
pub(crate) fn check_status(method: &'static str, url: &str, code: u32) -> Result<(), FetchError> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(FetchError::Status {
            method,
            url: url.to_string(),
            status: code,
        })
    }
}
