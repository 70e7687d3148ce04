//! Content-Type inspection: image check and extension synthesis.

/// Extension used when the content type gives nothing usable.
const DEFAULT_EXTENSION: &str = "jpg";

/// True if `content_type` declares an image (`image/...`).
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.trim_start().starts_with("image/")
}

/// File extension from a content type's subtype.
///
/// Parameters (`; charset=...`) and structured-syntax suffixes (`+xml`) are
/// dropped; `image/svg+xml` gives `svg`. Falls back to `jpg` when the type is
/// absent, has no `/`, or the subtype is not a plain token.
pub fn extension_for_content_type(content_type: Option<&str>) -> String {
    let subtype = content_type
        .and_then(|ct| ct.split(';').next())
        .and_then(|essence| essence.split_once('/'))
        .map(|(_, sub)| sub.split('+').next().unwrap_or("").trim().to_ascii_lowercase())
        .filter(|sub| {
            !sub.is_empty()
                && sub
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        });

    subtype.unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_check() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("image/svg+xml; charset=utf-8"));
        assert!(!is_image_content_type("text/html"));
        assert!(!is_image_content_type(""));
        assert!(!is_image_content_type("Image"));
    }

    #[test]
    fn extension_from_subtype() {
        assert_eq!(extension_for_content_type(Some("image/png")), "png");
        assert_eq!(extension_for_content_type(Some("image/JPEG; q=1")), "jpeg");
        assert_eq!(extension_for_content_type(Some("image/svg+xml")), "svg");
        assert_eq!(extension_for_content_type(Some("text/html")), "html");
    }

    #[test]
    fn extension_fallbacks() {
        assert_eq!(extension_for_content_type(None), "jpg");
        assert_eq!(extension_for_content_type(Some("")), "jpg");
        assert_eq!(extension_for_content_type(Some("garbage")), "jpg");
        assert_eq!(extension_for_content_type(Some("image/")), "jpg");
        assert_eq!(extension_for_content_type(Some("image/a b")), "jpg");
    }
}
