//! Filename extraction from URL path.

/// Returns the text after the last `/` of the URL path (query and fragment excluded).
///
/// Returns `None` for an empty segment (root path, trailing slash). Inputs the
/// `url` crate rejects (e.g. no scheme) are split by hand.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => last_segment(parsed.path()).to_string(),
        Err(_) => {
            let raw = url.split(|c| c == '?' || c == '#').next().unwrap_or("");
            let raw = raw.split_once("://").map(|(_, rest)| rest).unwrap_or(raw);
            let (_, path) = raw.split_once('/')?;
            last_segment(path).to_string()
        }
    };
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}
