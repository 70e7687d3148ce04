//! Linux-safe filename sanitization.

/// Longest filename Linux accepts, in bytes.
pub const NAME_MAX: usize = 255;

/// Extensions longer than this are not preserved when shortening a name.
const MAX_KEPT_EXTENSION: usize = 32;

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to 255 bytes (Linux NAME_MAX), shortening the stem so the
///   extension survives
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let unsafe_char =
            c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        let replacement = if unsafe_char { '_' } else { c };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let (stem, ext) = split_extension(trimmed);
    fit_with_tail(stem, ext, NAME_MAX)
}

/// Split `name` into stem and `.ext`. The extension is empty when there is
/// none, when the stem would be empty, or when it is implausibly long.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && name.len() - i <= MAX_KEPT_EXTENSION => name.split_at(i),
        _ => (name, ""),
    }
}

/// `stem + tail`, cutting `stem` on a char boundary so the result fits in `max` bytes.
pub(crate) fn fit_with_tail(stem: &str, tail: &str, max: usize) -> String {
    let mut take = max.saturating_sub(tail.len()).min(stem.len());
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &stem[..take], tail)
}
