//! File-backed adapters used by the command-line tool.

use super::{AssetId, AssetMetadata, MemoryAssetResolver, MemoryTranslationProvider, SchemaProvider};
use crate::error::{Result, TranslatorError};
use crate::library::LibraryRef;
use crate::schema::{parse_semantics, Semantics};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads `<root>/<name>-<major>.<minor>/semantics.json`, the layout of an
/// extracted H5P libraries folder.
#[derive(Debug, Clone)]
pub struct DirectorySchemaProvider {
    root: PathBuf,
}

impl DirectorySchemaProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn semantics_path(&self, library: &LibraryRef) -> PathBuf {
        self.root
            .join(format!("{}-{}.{}", library.name, library.major, library.minor))
            .join("semantics.json")
    }
}

impl SchemaProvider for DirectorySchemaProvider {
    fn resolve(&self, library: &LibraryRef) -> Option<Semantics> {
        let path = self.semantics_path(library);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                debug!("No semantics for {} at {}: {}", library, path.display(), e);
                return None;
            }
        };

        match parse_semantics(library, &json) {
            Ok(semantics) => Some(semantics),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TranslatorError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn malformed(path: &Path, source: serde_json::Error) -> TranslatorError {
    TranslatorError::MalformedFile {
        path: path.display().to_string(),
        source,
    }
}

/// `{ "<language>": { "<context>": { "<slot name>": "<translation>" } } }`
type CatalogFile = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// Load a translation catalog file.
pub fn load_catalog(path: &Path) -> Result<MemoryTranslationProvider> {
    let catalog: CatalogFile =
        serde_json::from_str(&read(path)?).map_err(|e| malformed(path, e))?;

    let mut provider = MemoryTranslationProvider::new();
    let mut count = 0;
    for (language, contexts) in &catalog {
        for (context, names) in contexts {
            for (name, translated) in names {
                provider.insert(language, context, name, translated);
                count += 1;
            }
        }
    }

    debug!("Loaded {} catalog entries from {}", count, path.display());
    Ok(provider)
}

#[derive(Debug, Deserialize)]
struct AssetManifest {
    assets: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    id: AssetId,
    url: String,
    #[serde(default)]
    width: Option<u64>,
    #[serde(default)]
    height: Option<u64>,
    #[serde(default)]
    mime: Option<String>,
    /// Language code to the id of the translated variant.
    #[serde(default)]
    translations: HashMap<String, AssetId>,
}

/// Load an asset manifest: `{ "assets": [{ "id", "url", "width", "height",
/// "mime", "translations": { "<language>": <id> } }] }`.
pub fn load_asset_manifest(path: &Path, allow_registration: bool) -> Result<MemoryAssetResolver> {
    let manifest: AssetManifest =
        serde_json::from_str(&read(path)?).map_err(|e| malformed(path, e))?;

    let mut resolver = MemoryAssetResolver::new();
    if allow_registration {
        resolver = resolver.with_registration();
    }

    for entry in &manifest.assets {
        resolver = resolver.with_asset(
            entry.id,
            &entry.url,
            AssetMetadata {
                width: entry.width,
                height: entry.height,
                mime: entry.mime.clone(),
            },
        );
        for (language, variant) in &entry.translations {
            resolver = resolver.with_variant(entry.id, language, *variant);
        }
    }

    Ok(resolver)
}
