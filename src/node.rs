//! Predicates over content nodes.
//!
//! Content parameters are plain `serde_json::Value` trees. These helpers keep
//! the "what does this node look like" checks in one place so the walker and
//! the fallback scanners agree on them.

use serde_json::Value;

/// Key carrying the stable identifier of a sub-content node.
pub const SUB_CONTENT_ID: &str = "subContentId";

/// Extensions treated as images when no mime type is available.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "tif", "tiff", "ico", "avif",
];

/// The node's stable identifier, if it carries a non-empty one.
///
/// Identifiers are normally strings but integer ids are accepted too.
pub fn sub_content_id(node: &Value) -> Option<String> {
    match node.get(SUB_CONTENT_ID)? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Borrow a string property of an object node.
pub fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key)?.as_str()
}

/// Strip any query string or fragment from a path or URL.
pub fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Whether a path ends in a known image extension, ignoring any query string.
pub fn has_image_extension(path: &str) -> bool {
    let path = strip_query(path);
    match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Whether an object node is a media reference pointing at an image.
pub fn looks_like_image(node: &Value) -> bool {
    let Some(path) = str_field(node, "path").filter(|p| !p.is_empty()) else {
        return false;
    };

    let image_mime = str_field(node, "mime")
        .map(|mime| mime.to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false);

    image_mime || has_image_extension(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sub_content_id_string() {
        let node = json!({"subContentId": " abc-123 "});
        assert_eq!(sub_content_id(&node).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_sub_content_id_number() {
        let node = json!({"subContentId": 7});
        assert_eq!(sub_content_id(&node).as_deref(), Some("7"));
    }

    #[test]
    fn test_sub_content_id_missing_or_blank() {
        assert!(sub_content_id(&json!({})).is_none());
        assert!(sub_content_id(&json!({"subContentId": ""})).is_none());
        assert!(sub_content_id(&json!({"subContentId": null})).is_none());
        assert!(sub_content_id(&json!("plain string")).is_none());
        assert!(sub_content_id(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("a/b.png?x=1"), "a/b.png");
        assert_eq!(strip_query("a/b.png#frag"), "a/b.png");
        assert_eq!(strip_query("a/b.png"), "a/b.png");
    }

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension("images/cat.PNG"));
        assert!(has_image_extension("images/cat.jpeg?v=2"));
        assert!(!has_image_extension("files/doc.pdf"));
        assert!(!has_image_extension("no-extension"));
        assert!(!has_image_extension(".png"));
        assert!(!has_image_extension("dir.png/file"));
    }

    #[test]
    fn test_looks_like_image_by_mime() {
        let node = json!({"path": "images/file-123", "mime": "image/jpeg"});
        assert!(looks_like_image(&node));
    }

    #[test]
    fn test_looks_like_image_by_extension() {
        let node = json!({"path": "images/cat.png"});
        assert!(looks_like_image(&node));
    }

    #[test]
    fn test_looks_like_image_rejects_other_media() {
        assert!(!looks_like_image(&json!({"path": "videos/a.mp4", "mime": "video/mp4"})));
        assert!(!looks_like_image(&json!({"path": ""})));
        assert!(!looks_like_image(&json!({"mime": "image/png"})));
        assert!(!looks_like_image(&json!("images/cat.png")));
    }
}
