//! Raw and stable paths for content nodes.
//!
//! Every visited node gets two parallel paths:
//!
//! - the *raw* path is positional and spells out schema field names and
//!   library keys. It is only used for diagnostics.
//! - the *stable* path is the translation key. It anchors on the innermost
//!   node carrying a `subContentId`, so reordering a list or moving content
//!   around does not change the slot a string is registered under.

use crate::library::LibraryRef;
use crate::node::sub_content_id;
use serde_json::Value;
use std::fmt;

/// The pair of paths identifying one content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    raw: String,
    stable: String,
}

fn anchor(id: &str) -> String {
    format!("subContentId:{}", id)
}

impl NodePath {
    /// Root path for a document of the given library.
    ///
    /// The stable root is the document's own identifier when it has one,
    /// otherwise the library key.
    pub fn root(library: &LibraryRef, root: &Value) -> Self {
        let raw = library.key();
        let stable = match sub_content_id(root) {
            Some(id) => anchor(&id),
            None => raw.clone(),
        };
        Self { raw, stable }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn stable(&self) -> &str {
        &self.stable
    }

    /// Path the slot name is derived from: stable, or raw when stable is empty.
    pub fn key(&self) -> &str {
        if self.stable.is_empty() {
            &self.raw
        } else {
            &self.stable
        }
    }

    /// Path of the named property `target` of the current node.
    pub fn child(&self, field: &str, target: &Value) -> Self {
        let raw = join(&self.raw, field);
        let stable = match sub_content_id(target) {
            Some(id) => anchor(&id),
            None => join(&self.stable, field),
        };
        Self { raw, stable }
    }

    /// Path of the list item `item` at `index`.
    pub fn indexed(&self, index: usize, item: &Value) -> Self {
        match sub_content_id(item) {
            Some(id) => {
                let token = anchor(&id);
                Self {
                    raw: format!("{}[{}]", self.raw, token),
                    stable: token,
                }
            }
            None => Self {
                raw: format!("{}[{}]", self.raw, index),
                stable: format!("{}[{}]", self.stable, index),
            },
        }
    }

    /// Path of the `params` of a polymorphic slot.
    ///
    /// `slot` is the node holding `library` and `params`. The stable path
    /// anchors on the slot's own identifier, then on the params' identifier,
    /// and otherwise appends the library segment.
    pub fn library_params(&self, library: &LibraryRef, slot: &Value, params: &Value) -> Self {
        let segment = format!(".library[{}]", library.key());
        let raw = format!("{}{}", self.raw, segment);
        let stable = match sub_content_id(slot).or_else(|| sub_content_id(params)) {
            Some(id) => anchor(&id),
            None => format!("{}{}", self.stable, segment),
        };
        Self { raw, stable }
    }
}

fn join(base: &str, field: &str) -> String {
    if base.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", base, field)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.raw, self.stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lib() -> LibraryRef {
        LibraryRef::new("H5P.Test", 1, 0)
    }

    // ==================== Root Tests ====================

    #[test]
    fn test_root_without_identifier() {
        let path = NodePath::root(&lib(), &json!({"text": "Hello"}));
        assert_eq!(path.raw(), "H5P.Test 1.0");
        assert_eq!(path.stable(), "H5P.Test 1.0");
    }

    #[test]
    fn test_root_with_identifier() {
        let path = NodePath::root(&lib(), &json!({"subContentId": "root-1"}));
        assert_eq!(path.raw(), "H5P.Test 1.0");
        assert_eq!(path.stable(), "subContentId:root-1");
    }

    // ==================== Child Tests ====================

    #[test]
    fn test_child_appends_field() {
        let root = NodePath::root(&lib(), &json!({}));
        let child = root.child("text", &json!("Hello"));
        assert_eq!(child.raw(), "H5P.Test 1.0.text");
        assert_eq!(child.stable(), "H5P.Test 1.0.text");
    }

    #[test]
    fn test_child_resets_on_identifier() {
        let root = NodePath::root(&lib(), &json!({}));
        let child = root.child("group", &json!({"subContentId": "g1"}));
        assert_eq!(child.raw(), "H5P.Test 1.0.group");
        assert_eq!(child.stable(), "subContentId:g1");

        let grandchild = child.child("title", &json!("x"));
        assert_eq!(grandchild.stable(), "subContentId:g1.title");
    }

    // ==================== Indexed Tests ====================

    #[test]
    fn test_indexed_without_identifier() {
        let root = NodePath::root(&lib(), &json!({}));
        let item = root.child("items", &json!([])).indexed(2, &json!("x"));
        assert_eq!(item.raw(), "H5P.Test 1.0.items[2]");
        assert_eq!(item.stable(), "H5P.Test 1.0.items[2]");
    }

    #[test]
    fn test_indexed_prefers_identifier() {
        let root = NodePath::root(&lib(), &json!({}));
        let list = root.child("items", &json!([]));
        let node = json!({"subContentId": "abc"});

        let at_two = list.indexed(2, &node);
        let at_zero = list.indexed(0, &node);

        assert_eq!(at_two.raw(), "H5P.Test 1.0.items[subContentId:abc]");
        assert_eq!(at_two.stable(), "subContentId:abc");
        assert_eq!(at_two.stable(), at_zero.stable());
    }

    // ==================== Library Tests ====================

    #[test]
    fn test_library_params_without_identifier() {
        let root = NodePath::root(&lib(), &json!({}));
        let slot = json!({"library": "H5P.Image 1.1", "params": {}});
        let field = root.child("media", &slot);
        let nested = field.library_params(&LibraryRef::new("H5P.Image", 1, 1), &slot, &slot["params"]);

        assert_eq!(nested.raw(), "H5P.Test 1.0.media.library[H5P.Image 1.1]");
        assert_eq!(nested.stable(), "H5P.Test 1.0.media.library[H5P.Image 1.1]");
    }

    #[test]
    fn test_library_params_anchor_precedence() {
        let root = NodePath::root(&lib(), &json!({}));
        let image = LibraryRef::new("H5P.Image", 1, 1);

        let slot = json!({"library": "H5P.Image 1.1", "subContentId": "outer", "params": {"subContentId": "inner"}});
        let nested = root.child("media", &slot).library_params(&image, &slot, &slot["params"]);
        assert_eq!(nested.stable(), "subContentId:outer");

        let slot = json!({"library": "H5P.Image 1.1", "params": {"subContentId": "inner"}});
        let nested = root.child("media", &slot).library_params(&image, &slot, &slot["params"]);
        assert_eq!(nested.stable(), "subContentId:inner");
        assert_eq!(nested.raw(), "H5P.Test 1.0.media.library[H5P.Image 1.1]");
    }

    #[test]
    fn test_key_falls_back_to_raw() {
        let path = NodePath {
            raw: "raw.path".to_string(),
            stable: String::new(),
        };
        assert_eq!(path.key(), "raw.path");
    }
}
