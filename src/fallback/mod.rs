//! Schema-independent scanners.
//!
//! These run after the schema walker over the whole (possibly already
//! translated) document. They rediscover text and images the semantics did
//! not cover, naming every node exactly like the walker would so that a value
//! the walker already handled is recognised by its slot name.

pub mod heuristics;
mod media;
mod text;

pub(crate) use media::scan_media;
pub(crate) use text::scan_text;

use crate::library::LibraryRef;
use crate::node::str_field;
use crate::path::NodePath;
use serde_json::Value;

/// Maximum nesting the scanners descend into.
pub const MAX_DEPTH: usize = 20;

/// Path the schema walker would give the `params` of `node`, if `node` is a
/// polymorphic slot with a parseable library descriptor.
fn params_path(node: &Value, path: &NodePath) -> Option<NodePath> {
    let library = LibraryRef::parse(str_field(node, "library")?)?;
    let params = node.get("params")?;
    Some(path.library_params(&library, node, params))
}

/// Path of the property `key` of `node`.
fn child_path(
    parent: &NodePath,
    params_path: Option<&NodePath>,
    key: &str,
    child: &Value,
) -> NodePath {
    match params_path {
        Some(nested) if key == "params" => nested.clone(),
        _ => parent.child(key, child),
    }
}
