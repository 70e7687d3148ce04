//! Parse HTTP response header lines into ProbeResult.

use super::ProbeResult;

/// Parse collected header lines into ProbeResult.
///
/// A status line (`HTTP/...`) starts a new response, so with redirects only the
/// final hop's headers are kept.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeResult {
    let mut result = ProbeResult::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            result = ProbeResult::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") && !value.is_empty() {
                result.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                result.content_length = value.parse::<u64>().ok();
            }
        }
    }

    result
}
