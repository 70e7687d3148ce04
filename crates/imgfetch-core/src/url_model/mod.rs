//! URL modeling and filename derivation.
//!
//! Derives the local filename for a fetched image from the URL's last path
//! segment, or synthesizes one from the declared content type.

mod content_type;
mod path;
mod sanitize;

pub use content_type::{extension_for_content_type, is_image_content_type};
pub use path::filename_from_url_path;
pub use sanitize::{sanitize_filename_for_linux, NAME_MAX};
pub(crate) use sanitize::{fit_with_tail, split_extension};

/// Stem used when the URL has no usable filename.
const SYNTHESIZED_STEM: &str = "downloaded_image";

/// Derives a safe filename for saving an image.
///
/// Uses the last path segment of `url` when it looks like a filename (has a
/// `.` after sanitizing); otherwise `downloaded_image.<ext>` with `<ext>` taken
/// from `content_type`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/photo.jpg", Some("image/jpeg"))` → `"photo.jpg"`
/// - `derive_filename("https://example.com/", Some("image/png"))` → `"downloaded_image.png"`
pub fn derive_filename(url: &str, content_type: Option<&str>) -> String {
    let from_url = filename_from_url_path(url)
        .map(|s| sanitize_filename_for_linux(&s))
        .filter(|s| s.contains('.'));

    match from_url {
        Some(name) => name,
        None => synthesized_filename(content_type),
    }
}

/// `downloaded_image.<ext>` for the given content type.
pub fn synthesized_filename(content_type: Option<&str>) -> String {
    format!(
        "{}.{}",
        SYNTHESIZED_STEM,
        extension_for_content_type(content_type)
    )
}

/// Split comma-separated operator input into trimmed, non-empty URLs.
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(
            derive_filename("https://example.com/photo.jpg", Some("image/jpeg")),
            "photo.jpg"
        );
        assert_eq!(
            derive_filename("https://cdn.example.com/a/b/cat.webp?w=200", None),
            "cat.webp"
        );
    }

    #[test]
    fn derive_filename_root_path_synthesizes() {
        assert_eq!(
            derive_filename("https://example.com/", Some("image/png")),
            "downloaded_image.png"
        );
        assert_eq!(
            derive_filename("https://example.com", Some("image/gif")),
            "downloaded_image.gif"
        );
    }

    #[test]
    fn derive_filename_segment_without_extension() {
        assert_eq!(
            derive_filename("https://example.com/avatar", Some("image/webp")),
            "downloaded_image.webp"
        );
        assert_eq!(
            derive_filename("https://example.com/gallery/", None),
            "downloaded_image.jpg"
        );
    }

    #[test]
    fn derive_filename_dot_only_segment() {
        assert_eq!(
            derive_filename("https://example.com/...", Some("image/png")),
            "downloaded_image.png"
        );
    }

    #[test]
    fn parse_url_list_trims_and_drops_empty() {
        assert_eq!(
            parse_url_list(" https://a/x.png , ,https://b/y.jpg,"),
            vec!["https://a/x.png".to_string(), "https://b/y.jpg".to_string()]
        );
        assert!(parse_url_list("  ,  ").is_empty());
        assert!(parse_url_list("").is_empty());
    }
}
