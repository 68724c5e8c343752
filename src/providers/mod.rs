//! Ports to the services the translator depends on.
//!
//! The traversal never talks to a CMS, a string-translation plugin or a media
//! library directly. It goes through these traits instead:
//!
//! - `SchemaProvider`: field semantics for a library version
//! - `TranslationProvider`: registers strings and returns their translation
//! - `AssetResolver`: maps media URLs to assets and their language variants
//! - `LanguageContext`: the active and default language of the request
//!
//! Every port fails fast by returning `None` (or the input unchanged); the
//! traversal treats that as "leave untranslated" and moves on.
//!
//! # Example
//!
//! ```rust,ignore
//! use h5p_translator::providers::{MemoryTranslationProvider, StaticLanguageContext};
//!
//! let translations = MemoryTranslationProvider::new()
//!     .with_translation("fr", "H5P Content 42", "H5P.Test 1.0.text", "Bonjour");
//! let language = StaticLanguageContext::new(Some("fr"), Some("en"));
//! ```

mod files;
mod memory;

pub use files::{load_asset_manifest, load_catalog, DirectorySchemaProvider};
pub use memory::{
    AssetRecord, MemoryAssetResolver, MemorySchemaProvider, MemoryTranslationProvider,
    Registration, StaticLanguageContext,
};

use crate::library::LibraryRef;
use crate::schema::Semantics;

/// Durable identity of a media asset, independent of its URL.
pub type AssetId = u64;

/// Stored properties of an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMetadata {
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub mime: Option<String>,
}

/// Resolves library semantics.
pub trait SchemaProvider: Send + Sync {
    /// Field list for the library, or `None` when the library is unknown.
    fn resolve(&self, library: &LibraryRef) -> Option<Semantics>;
}

/// Registers translatable strings and looks up their translations.
pub trait TranslationProvider: Send + Sync {
    /// Whether the backing string-translation service is present at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Register `value` under `(context, name)`. A no-op when unavailable.
    fn register(&self, context: &str, name: &str, value: &str, allow_html: bool);

    /// Translation of `value`, or `value` itself when none exists.
    fn translate(&self, value: &str, context: &str, name: &str, language: Option<&str>) -> String;
}

/// Maps media URLs to assets and their translated variants.
pub trait AssetResolver: Send + Sync {
    /// Read-only lookup of an already known asset.
    fn lookup_by_url(&self, url: &str) -> Option<AssetId>;

    /// Best-effort registration of an unknown asset.
    fn ensure_registered(&self, url: &str) -> Option<AssetId>;

    /// The asset's variant for `language`, if one exists.
    fn translated_variant(&self, asset: AssetId, language: Option<&str>) -> Option<AssetId>;

    fn url_of(&self, asset: AssetId) -> Option<String>;

    fn metadata_of(&self, asset: AssetId) -> AssetMetadata;
}

/// Active and default language of the current request.
pub trait LanguageContext: Send + Sync {
    fn current_language(&self) -> Option<String>;
    fn default_language(&self) -> Option<String>;
}
