//! Object key generation.

use chrono::Utc;

/// Build a collision-resistant object key from an uploaded filename.
///
/// The original filename is kept (sanitized) so keys stay readable in
/// the bucket, prefixed with the upload timestamp for uniqueness.
pub fn object_key(filename: &str) -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), sanitize(filename))
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_chars() {
        assert_eq!(sanitize("report-12.jpg"), "report-12.jpg");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize("my photo.jpg"), "my_photo.jpg");
        assert_eq!(sanitize("a/b\\c.png"), "a_b_c.png");
        assert_eq!(sanitize("фото.jpg"), "____.jpg");
    }

    #[test]
    fn test_object_key_ends_with_filename() {
        let key = object_key("photo.jpg");
        assert!(key.ends_with("_photo.jpg"));
        let prefix = key.strip_suffix("_photo.jpg").unwrap();
        assert!(prefix.parse::<i64>().is_ok());
    }
}
