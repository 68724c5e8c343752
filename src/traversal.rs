//! State owned by one top-level translation call.
//!
//! A `Traversal` is created per document and threaded by `&mut` through the
//! schema walker and the fallback scanners, so nothing translated for one
//! content item can leak into another.

use crate::codec::NameCodec;
use crate::media::MediaTranslator;
use crate::path::NodePath;
use crate::providers::TranslationProvider;
use crate::schema::SchemaCache;
use crate::scope::RequestScope;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Slot names already handled during one traversal.
#[derive(Debug, Default)]
pub struct TranslatedNames {
    translated: HashSet<String>,
    covered: HashSet<String>,
}

impl TranslatedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a slot the schema walker or the fallback scanner translated.
    pub fn insert(&mut self, name: String) -> bool {
        self.translated.insert(name)
    }

    /// Record a schema-described scalar the walker deliberately left alone.
    pub fn cover(&mut self, name: String) {
        self.covered.insert(name);
    }

    pub fn is_translated(&self, name: &str) -> bool {
        self.translated.contains(name)
    }

    /// Whether the fallback scanner must leave this slot alone.
    pub fn is_handled(&self, name: &str) -> bool {
        self.translated.contains(name) || self.covered.contains(name)
    }

    pub fn len(&self) -> usize {
        self.translated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translated.is_empty()
    }
}

/// What one call to `translate_content` did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    /// Whether semantics were found for the root library.
    pub schema_available: bool,
    /// Strings submitted by the schema walker.
    pub schema_strings: usize,
    /// Strings submitted by the fallback text scanner.
    pub fallback_strings: usize,
    /// Media references replaced with a translated variant.
    pub media_replaced: usize,
}

pub(crate) struct Traversal<'a> {
    pub schemas: &'a SchemaCache,
    pub translations: &'a dyn TranslationProvider,
    pub media: MediaTranslator<'a>,
    pub scope: &'a RequestScope,
    pub codec: NameCodec,
    pub names: TranslatedNames,
    pub report: TranslationReport,
}

impl<'a> Traversal<'a> {
    pub fn slot_name(&self, path: &NodePath) -> String {
        self.codec.encode(path.key())
    }

    /// Register the value, record the slot and return its translation.
    pub fn register_and_translate(
        &mut self,
        value: &str,
        name: String,
        path: &NodePath,
        allow_html: bool,
    ) -> String {
        let context = &self.scope.context;
        debug!("Registering {} (raw path {}, html: {})", name, path.raw(), allow_html);

        self.translations.register(context, &name, value, allow_html);
        let translated =
            self.translations
                .translate(value, context, &name, self.scope.language.as_deref());

        self.names.insert(name);
        translated
    }

    pub fn translate_media(&mut self, node: &mut Value, path: &NodePath) {
        if self.media.translate(node, self.scope, path) {
            self.report.media_replaced += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_names_insert_and_contains() {
        let mut names = TranslatedNames::new();
        assert!(names.insert("a".to_string()));
        assert!(!names.insert("a".to_string()));

        assert!(names.is_translated("a"));
        assert!(names.is_handled("a"));
        assert!(!names.is_translated("b"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_covered_names_are_handled_but_not_translated() {
        let mut names = TranslatedNames::new();
        names.cover("select".to_string());

        assert!(names.is_handled("select"));
        assert!(!names.is_translated("select"));
        assert!(names.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let report = TranslationReport {
            schema_available: true,
            schema_strings: 2,
            fallback_strings: 1,
            media_replaced: 0,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"schema_strings\":2"));
    }
}
