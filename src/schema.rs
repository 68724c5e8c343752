//! Semantics model: the field schema of an H5P library.
//!
//! Semantics arrive as the JSON array found in a library's `semantics.json`.
//! Only the attributes the traversal needs are kept; everything else in the
//! field definitions is ignored.

use crate::error::{Result, TranslatorError};
use crate::library::LibraryRef;
use crate::providers::SchemaProvider;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Kind of a schema field, as far as translation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Html,
    Image,
    File,
    Group,
    List,
    Library,
    Other,
}

impl From<&str> for FieldKind {
    fn from(kind: &str) -> Self {
        match kind {
            "text" => FieldKind::Text,
            "textarea" => FieldKind::Textarea,
            "html" => FieldKind::Html,
            "image" => FieldKind::Image,
            "file" => FieldKind::File,
            "group" => FieldKind::Group,
            "list" => FieldKind::List,
            "library" => FieldKind::Library,
            _ => FieldKind::Other,
        }
    }
}

/// One field definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    /// Sub-fields of a group (or of an unrecognised kind that declares them).
    pub children: Option<Vec<SchemaField>>,
    /// Item definition of a list.
    pub item: Option<Box<SchemaField>>,
    /// Whether the field declares a tag allowlist.
    pub has_tags: bool,
    pub widget: Option<String>,
}

#[derive(Deserialize)]
struct RawField {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    fields: Option<Vec<SchemaField>>,
    #[serde(default)]
    field: Option<Box<SchemaField>>,
    #[serde(default)]
    tags: Option<serde_json::Value>,
    #[serde(default)]
    widget: Option<String>,
}

impl From<RawField> for SchemaField {
    fn from(raw: RawField) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            kind: raw.kind.as_deref().map(FieldKind::from).unwrap_or(FieldKind::Other),
            children: raw.fields,
            item: raw.field,
            has_tags: raw.tags.is_some_and(|tags| !tags.is_null()),
            widget: raw.widget,
        }
    }
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: None,
            item: None,
            has_tags: false,
            widget: None,
        }
    }

    pub fn with_children(mut self, children: Vec<SchemaField>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_item(mut self, item: SchemaField) -> Self {
        self.item = Some(Box::new(item));
        self
    }

    pub fn with_tags(mut self) -> Self {
        self.has_tags = true;
        self
    }

    pub fn with_widget(mut self, widget: impl Into<String>) -> Self {
        self.widget = Some(widget.into());
        self
    }

    /// Whether values of this field may contain markup.
    pub fn allows_html(&self) -> bool {
        self.kind == FieldKind::Html || self.has_tags || self.widget.as_deref() == Some("html")
    }
}

/// Top-level field list of a library.
pub type Semantics = Vec<SchemaField>;

/// Parse a `semantics.json` document.
pub fn parse_semantics(library: &LibraryRef, json: &str) -> Result<Semantics> {
    serde_json::from_str(json).map_err(|source| TranslatorError::MalformedSemantics {
        library: library.key(),
        source,
    })
}

/// Memoizes semantics lookups keyed by `name:major.minor`.
///
/// Unknown libraries are cached too. Population is idempotent, so concurrent
/// writers racing on the same key are harmless.
pub struct SchemaCache {
    provider: Arc<dyn SchemaProvider>,
    entries: RwLock<HashMap<String, Option<Arc<Semantics>>>>,
}

impl SchemaCache {
    pub fn new(provider: Arc<dyn SchemaProvider>) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Semantics for a library, or `None` when the library is unknown or has
    /// no fields.
    pub fn resolve(&self, library: &LibraryRef) -> Option<Arc<Semantics>> {
        let key = library.cache_key();

        if let Ok(entries) = self.entries.read() {
            if let Some(cached) = entries.get(&key) {
                return cached.clone();
            }
        }

        let resolved = self
            .provider
            .resolve(library)
            .filter(|semantics| !semantics.is_empty())
            .map(Arc::new);

        debug!(
            "Semantics for {}: {}",
            key,
            if resolved.is_some() { "loaded" } else { "unavailable" }
        );

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, resolved.clone());
        }

        resolved
    }

    /// Number of memoized lookups (hits and misses).
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MemorySchemaProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_semantics_kinds() {
        let lib = LibraryRef::new("H5P.Test", 1, 0);
        let json = r#"[
            {"name": "title", "type": "text", "label": "Title"},
            {"name": "body", "type": "text", "widget": "html", "tags": ["p", "strong"]},
            {"name": "items", "type": "list", "field": {"name": "item", "type": "text"}},
            {"name": "settings", "type": "group", "fields": [{"name": "color", "type": "text"}]},
            {"name": "media", "type": "library", "options": ["H5P.Image 1.1"]},
            {"name": "count", "type": "number"}
        ]"#;

        let semantics = parse_semantics(&lib, json).unwrap();
        assert_eq!(semantics.len(), 6);
        assert_eq!(semantics[0].kind, FieldKind::Text);
        assert!(!semantics[0].allows_html());
        assert!(semantics[1].has_tags);
        assert!(semantics[1].allows_html());
        assert_eq!(semantics[2].kind, FieldKind::List);
        assert_eq!(semantics[2].item.as_ref().unwrap().name, "item");
        assert_eq!(semantics[3].children.as_ref().unwrap().len(), 1);
        assert_eq!(semantics[4].kind, FieldKind::Library);
        assert_eq!(semantics[5].kind, FieldKind::Other);
    }

    #[test]
    fn test_parse_semantics_tolerates_missing_attributes() {
        let lib = LibraryRef::new("H5P.Test", 1, 0);
        let semantics = parse_semantics(&lib, r#"[{"label": "nameless"}]"#).unwrap();
        assert_eq!(semantics[0].name, "");
        assert_eq!(semantics[0].kind, FieldKind::Other);
    }

    #[test]
    fn test_parse_semantics_malformed() {
        let lib = LibraryRef::new("H5P.Test", 1, 0);
        let err = parse_semantics(&lib, "{not json").unwrap_err();
        assert!(err.to_string().contains("H5P.Test 1.0"));
    }

    #[test]
    fn test_html_kind_allows_html() {
        assert!(SchemaField::new("x", FieldKind::Html).allows_html());
        assert!(SchemaField::new("x", FieldKind::Text).with_tags().allows_html());
        assert!(SchemaField::new("x", FieldKind::Text).with_widget("html").allows_html());
        assert!(!SchemaField::new("x", FieldKind::Textarea).allows_html());
    }

    // ==================== Cache Tests ====================

    struct CountingProvider {
        inner: MemorySchemaProvider,
        calls: AtomicUsize,
    }

    impl SchemaProvider for CountingProvider {
        fn resolve(&self, library: &LibraryRef) -> Option<Semantics> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(library)
        }
    }

    #[test]
    fn test_cache_memoizes_hits_and_misses() {
        let known = LibraryRef::new("H5P.Known", 1, 2);
        let unknown = LibraryRef::new("H5P.Unknown", 1, 0);

        let provider = Arc::new(CountingProvider {
            inner: MemorySchemaProvider::new()
                .with(known.clone(), vec![SchemaField::new("text", FieldKind::Text)]),
            calls: AtomicUsize::new(0),
        });
        let cache = SchemaCache::new(provider.clone());

        assert!(cache.resolve(&known).is_some());
        assert!(cache.resolve(&known).is_some());
        assert!(cache.resolve(&unknown).is_none());
        assert!(cache.resolve(&unknown).is_none());

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_treats_empty_semantics_as_unknown() {
        let lib = LibraryRef::new("H5P.Empty", 1, 0);
        let cache = SchemaCache::new(Arc::new(MemorySchemaProvider::new().with(lib.clone(), vec![])));
        assert!(cache.resolve(&lib).is_none());
    }
}
