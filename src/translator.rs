//! Entry point: translate one H5P parameters document.

use crate::codec::NameCodec;
use crate::config::Config;
use crate::fallback::{scan_media, scan_text};
use crate::library::LibraryRef;
use crate::media::MediaTranslator;
use crate::path::NodePath;
use crate::providers::{AssetResolver, LanguageContext, TranslationProvider};
use crate::schema::SchemaCache;
use crate::scope::RequestScope;
use crate::traversal::{TranslatedNames, TranslationReport, Traversal};
use crate::walker::walk_fields;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Translates parameters documents through the configured ports.
///
/// The translator itself holds no per-document state and can be shared
/// across threads; the schema cache is the only thing reused between calls.
pub struct ContentTranslator {
    config: Config,
    schemas: Arc<SchemaCache>,
    translations: Arc<dyn TranslationProvider>,
    assets: Arc<dyn AssetResolver>,
    language: Arc<dyn LanguageContext>,
    codec: NameCodec,
}

impl ContentTranslator {
    pub fn new(
        config: Config,
        schemas: Arc<SchemaCache>,
        translations: Arc<dyn TranslationProvider>,
        assets: Arc<dyn AssetResolver>,
        language: Arc<dyn LanguageContext>,
    ) -> Self {
        Self {
            config,
            schemas,
            translations,
            assets,
            language,
            codec: NameCodec::default(),
        }
    }

    pub fn with_codec(mut self, codec: NameCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schemas(&self) -> &SchemaCache {
        &self.schemas
    }

    /// Translate `document` in place.
    ///
    /// Runs the schema walker when semantics for the library are available,
    /// then the fallback text scanner (for libraries in the fallback scope)
    /// and the fallback media scanner. Nothing here fails: whatever cannot be
    /// resolved stays untranslated.
    pub fn translate_content(
        &self,
        document: &mut Value,
        library_name: &str,
        major: u32,
        minor: u32,
        content_id: Option<u64>,
    ) -> TranslationReport {
        if !document.is_object() && !document.is_array() {
            debug!("Parameters for {} are not a composite value, skipping", library_name);
            return TranslationReport::default();
        }

        let library = LibraryRef::new(library_name, major, minor);
        let scope = RequestScope::resolve(self.language.as_ref(), content_id);
        let root = NodePath::root(&library, document);

        let mut t = Traversal {
            schemas: &self.schemas,
            translations: self.translations.as_ref(),
            media: MediaTranslator::new(self.assets.as_ref(), &self.config),
            scope: &scope,
            codec: self.codec,
            names: TranslatedNames::new(),
            report: TranslationReport::default(),
        };

        match self.schemas.resolve(&library) {
            Some(semantics) => {
                t.report.schema_available = true;
                walk_fields(&mut t, document, &semantics, &root);
            }
            None => debug!("No semantics for {}, using fallback scanning only", library),
        }

        let fallback_enabled = self.translations.is_available()
            && self.config.fallback_libraries.includes(&library.name);
        if fallback_enabled {
            scan_text(&mut t, document, &root, None, 0);
        }

        scan_media(&mut t, document, &root, 0);

        info!(
            "Translated {} ({}, language {}): {} schema strings, {} fallback strings, {} media",
            library,
            scope.context,
            scope.language.as_deref().unwrap_or("-"),
            t.report.schema_strings,
            t.report.fallback_strings,
            t.report.media_replaced
        );

        t.report
    }
}
