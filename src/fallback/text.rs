use super::heuristics::skip_reason;
use super::{child_path, params_path, MAX_DEPTH};
use crate::path::NodePath;
use crate::traversal::Traversal;
use serde_json::Value;
use tracing::{debug, trace};

/// Find and translate prose the schema walker did not handle.
///
/// `key` is the property name the node sits under; list items inherit the
/// key of their list.
pub(crate) fn scan_text(
    t: &mut Traversal,
    node: &mut Value,
    path: &NodePath,
    key: Option<&str>,
    depth: usize,
) {
    if depth > MAX_DEPTH {
        debug!("Depth limit reached at {}", path.raw());
        return;
    }

    let nested = params_path(node, path);

    match node {
        Value::String(text) => translate_leaf(t, text, path, key),

        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                let item_path = path.indexed(index, item);
                scan_text(t, item, &item_path, key, depth + 1);
            }
        }

        Value::Object(map) => {
            for (child_key, child) in map.iter_mut() {
                let at = child_path(path, nested.as_ref(), child_key, child);
                scan_text(t, child, &at, Some(child_key.as_str()), depth + 1);
            }
        }

        _ => {}
    }
}

fn translate_leaf(t: &mut Traversal, text: &mut String, path: &NodePath, key: Option<&str>) {
    if text.trim().is_empty() {
        return;
    }

    let name = t.slot_name(path);
    if t.names.is_handled(&name) {
        trace!("Already handled: {}", name);
        return;
    }

    if let Some(reason) = skip_reason(key, text) {
        trace!("Skipping {} ({:?})", path.raw(), reason);
        return;
    }

    let allow_html = text.contains('<') && text.contains('>');
    let translated = t.register_and_translate(text, name, path, allow_html);

    *text = translated;
    t.report.fallback_strings += 1;
}
