//! Schema-driven traversal.
//!
//! Walks a parameters document alongside its semantics and dispatches on the
//! field kind of every value it finds. Values the schema does not describe,
//! or describes with the wrong shape, are skipped and left to the fallback
//! scanners.

use crate::library::LibraryRef;
use crate::node::{looks_like_image, str_field};
use crate::path::NodePath;
use crate::schema::{FieldKind, SchemaField};
use crate::traversal::Traversal;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether a string contains something that looks like a tag.
pub fn contains_markup(value: &str) -> bool {
    MARKUP_REGEX
        .get_or_init(|| Regex::new(r"</?[a-zA-Z][^<>]*>").expect("markup regex"))
        .is_match(value)
}

/// Walk the named fields of an object node.
pub(crate) fn walk_fields(
    t: &mut Traversal,
    params: &mut Value,
    fields: &[SchemaField],
    path: &NodePath,
) {
    let Some(map) = params.as_object_mut() else {
        debug!("Expected an object at {}, skipping", path.raw());
        return;
    };

    for field in fields {
        if field.name.is_empty() {
            continue;
        }
        let Some(value) = map.get_mut(&field.name) else {
            continue;
        };

        let child = path.child(&field.name, value);
        walk_field(t, value, field, &child);
    }
}

fn walk_field(t: &mut Traversal, value: &mut Value, field: &SchemaField, path: &NodePath) {
    match field.kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Html => {
            translate_text(t, value, field, path)
        }

        FieldKind::Image => t.translate_media(value, path),

        FieldKind::File => {
            if looks_like_image(value) {
                t.translate_media(value, path);
            }
        }

        FieldKind::Group => {
            if let Some(children) = &field.children {
                if value.is_object() {
                    walk_fields(t, value, children, path);
                }
            }
        }

        FieldKind::List => {
            let (Some(item_field), Some(items)) = (&field.item, value.as_array_mut()) else {
                return;
            };
            for (index, item) in items.iter_mut().enumerate() {
                let item_path = path.indexed(index, item);
                walk_field(t, item, item_field, &item_path);
            }
        }

        FieldKind::Library => walk_library(t, value, path),

        FieldKind::Other => match &field.children {
            Some(children) => walk_fields(t, value, children, path),
            None => {
                // Select values, colors and the like are described by the
                // schema, so the fallback scan must not pick them up.
                if value.is_string() {
                    let name = t.slot_name(path);
                    t.names.cover(name);
                }
            }
        },
    }
}

fn translate_text(t: &mut Traversal, value: &mut Value, field: &SchemaField, path: &NodePath) {
    let Value::String(text) = value else {
        return;
    };
    if text.is_empty() {
        return;
    }

    let allow_html = field.allows_html() || contains_markup(text);
    let name = t.slot_name(path);
    let translated = t.register_and_translate(text, name, path, allow_html);

    *text = translated;
    t.report.schema_strings += 1;
}

fn walk_library(t: &mut Traversal, value: &mut Value, path: &NodePath) {
    let Some(descriptor) = str_field(value, "library") else {
        return;
    };
    let Some(library) = LibraryRef::parse(descriptor) else {
        debug!("Unparseable library descriptor at {}: '{}'", path.raw(), descriptor);
        return;
    };
    let Some(params) = value.get("params").filter(|params| !params.is_null()) else {
        return;
    };

    let nested = path.library_params(&library, value, params);

    let Some(semantics) = t.schemas.resolve(&library) else {
        debug!("No semantics for {} at {}, deferring to fallback", library, path.raw());
        return;
    };

    if let Some(params) = value.get_mut("params") {
        walk_fields(t, params, &semantics, &nested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NameCodec;
    use crate::config::Config;
    use crate::media::MediaTranslator;
    use crate::providers::{
        AssetMetadata, MemoryAssetResolver, MemorySchemaProvider, MemoryTranslationProvider,
    };
    use crate::schema::SchemaCache;
    use crate::scope::RequestScope;
    use crate::traversal::{TranslatedNames, TranslationReport};
    use serde_json::json;
    use std::sync::Arc;

    fn image_assets() -> MemoryAssetResolver {
        MemoryAssetResolver::new()
            .with_asset(
                1,
                "https://example.com/wp-content/uploads/h5p/content/7/files/scan",
                AssetMetadata::default(),
            )
            .with_asset(2, "https://example.com/scan-fr", AssetMetadata::default())
            .with_variant(1, "fr", 2)
    }

    fn walk(
        document: &mut Value,
        fields: &[SchemaField],
        assets: &MemoryAssetResolver,
    ) -> TranslationReport {
        let config = Config::new("https://example.com").unwrap();
        let schemas = SchemaCache::new(Arc::new(MemorySchemaProvider::new()));
        let translations = MemoryTranslationProvider::new();
        let scope = RequestScope {
            language: Some("fr".to_string()),
            context: "H5P Content 7".to_string(),
            content_id: Some(7),
        };
        let library = LibraryRef::new("H5P.Test", 1, 0);
        let root = NodePath::root(&library, document);

        let mut t = Traversal {
            schemas: &schemas,
            translations: &translations,
            media: MediaTranslator::new(assets, &config),
            scope: &scope,
            codec: NameCodec::default(),
            names: TranslatedNames::new(),
            report: TranslationReport::default(),
        };
        walk_fields(&mut t, document, fields, &root);
        t.report
    }

    #[test]
    fn test_file_field_with_image_mime_is_translated() {
        let assets = image_assets();
        let fields = vec![SchemaField::new("attachment", FieldKind::File)];

        // No extension: only the mime marks it as an image.
        let mut doc = json!({"attachment": {"path": "files/scan", "mime": "image/png"}});
        let report = walk(&mut doc, &fields, &assets);

        assert_eq!(report.media_replaced, 1);
        assert_eq!(doc["attachment"]["path"], "https://example.com/scan-fr");
    }

    #[test]
    fn test_file_field_without_image_marker_is_left_alone() {
        let assets = image_assets();
        let fields = vec![SchemaField::new("attachment", FieldKind::File)];

        let mut doc = json!({"attachment": {"path": "files/scan", "mime": "application/pdf"}});
        let report = walk(&mut doc, &fields, &assets);

        assert_eq!(report.media_replaced, 0);
        assert_eq!(doc["attachment"]["path"], "files/scan");
    }

    #[test]
    fn test_contains_markup() {
        assert!(contains_markup("<p>Hello</p>"));
        assert!(contains_markup("Click <strong>here</strong>"));
        assert!(!contains_markup("a < b and c > d"));
        assert!(!contains_markup("plain text"));
        assert!(!contains_markup("<>"));
    }
}
