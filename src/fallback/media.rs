use super::{child_path, params_path, MAX_DEPTH};
use crate::node::looks_like_image;
use crate::path::NodePath;
use crate::traversal::Traversal;
use serde_json::Value;
use tracing::debug;

/// Route every image-like object through the media translator.
///
/// No deduplication against the walker: resolving an already translated
/// path yields the same asset again.
pub(crate) fn scan_media(t: &mut Traversal, node: &mut Value, path: &NodePath, depth: usize) {
    if depth > MAX_DEPTH {
        debug!("Depth limit reached at {}", path.raw());
        return;
    }

    if looks_like_image(node) {
        t.translate_media(node, path);
    }

    let nested = params_path(node, path);

    match node {
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                let item_path = path.indexed(index, item);
                scan_media(t, item, &item_path, depth + 1);
            }
        }
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let at = child_path(path, nested.as_ref(), key, child);
                scan_media(t, child, &at, depth + 1);
            }
        }
        _ => {}
    }
}
