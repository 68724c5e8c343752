//! In-process implementations of the ports.
//!
//! Used by the command-line tool (fed from JSON files) and by tests, which
//! inspect the recorded registrations and lookups.

use super::{
    AssetId, AssetMetadata, AssetResolver, LanguageContext, SchemaProvider, TranslationProvider,
};
use crate::library::LibraryRef;
use crate::schema::Semantics;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

// ==================== Schema ====================

/// Semantics held in a map keyed by library.
#[derive(Debug, Default)]
pub struct MemorySchemaProvider {
    semantics: HashMap<LibraryRef, Semantics>,
}

impl MemorySchemaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, library: LibraryRef, semantics: Semantics) -> Self {
        self.semantics.insert(library, semantics);
        self
    }
}

impl SchemaProvider for MemorySchemaProvider {
    fn resolve(&self, library: &LibraryRef) -> Option<Semantics> {
        self.semantics.get(library).cloned()
    }
}

// ==================== Translations ====================

/// A string registered for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub context: String,
    pub name: String,
    pub value: String,
    pub allow_html: bool,
}

/// Translation catalog keyed by language, context and slot name.
#[derive(Debug, Default)]
pub struct MemoryTranslationProvider {
    available: bool,
    catalog: HashMap<(String, String, String), String>,
    registrations: Mutex<Vec<Registration>>,
    lookups: Mutex<Vec<(String, String, String)>>,
}

impl MemoryTranslationProvider {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// A provider reporting itself as unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_translation(
        mut self,
        language: &str,
        context: &str,
        name: &str,
        translated: &str,
    ) -> Self {
        self.insert(language, context, name, translated);
        self
    }

    pub fn insert(&mut self, language: &str, context: &str, name: &str, translated: &str) {
        self.catalog.insert(
            (language.to_string(), context.to_string(), name.to_string()),
            translated.to_string(),
        );
    }

    /// Every registration made so far, in call order.
    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations
            .lock()
            .map(|regs| regs.clone())
            .unwrap_or_default()
    }

    /// How many times `name` was registered.
    pub fn registration_count(&self, name: &str) -> usize {
        self.registrations()
            .iter()
            .filter(|reg| reg.name == name)
            .count()
    }

    /// Every `(value, context, name)` passed to `translate`, in call order.
    pub fn lookups(&self) -> Vec<(String, String, String)> {
        self.lookups
            .lock()
            .map(|lookups| lookups.clone())
            .unwrap_or_default()
    }
}

impl TranslationProvider for MemoryTranslationProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    fn register(&self, context: &str, name: &str, value: &str, allow_html: bool) {
        if !self.available {
            return;
        }
        if let Ok(mut regs) = self.registrations.lock() {
            regs.push(Registration {
                context: context.to_string(),
                name: name.to_string(),
                value: value.to_string(),
                allow_html,
            });
        }
    }

    fn translate(&self, value: &str, context: &str, name: &str, language: Option<&str>) -> String {
        if !self.available {
            return value.to_string();
        }
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push((value.to_string(), context.to_string(), name.to_string()));
        }

        let Some(language) = language else {
            return value.to_string();
        };

        match self
            .catalog
            .get(&(language.to_string(), context.to_string(), name.to_string()))
        {
            Some(translated) => {
                debug!("Translation hit for {} [{}]", name, language);
                translated.clone()
            }
            None => value.to_string(),
        }
    }
}

// ==================== Assets ====================

/// One asset known to the in-memory resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub url: String,
    pub metadata: AssetMetadata,
}

#[derive(Debug, Default)]
struct AssetState {
    assets: HashMap<AssetId, AssetRecord>,
    by_url: HashMap<String, AssetId>,
    variants: HashMap<(AssetId, String), AssetId>,
    next_id: AssetId,
}

/// Asset registry with per-language variants.
#[derive(Debug, Default)]
pub struct MemoryAssetResolver {
    state: Mutex<AssetState>,
    allow_registration: bool,
}

impl MemoryAssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `ensure_registered` create assets for unknown URLs.
    pub fn with_registration(mut self) -> Self {
        self.allow_registration = true;
        self
    }

    pub fn with_asset(self, id: AssetId, url: &str, metadata: AssetMetadata) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.assets.insert(
                id,
                AssetRecord {
                    url: url.to_string(),
                    metadata,
                },
            );
            state.by_url.insert(url.to_string(), id);
            state.next_id = state.next_id.max(id.saturating_add(1));
        }
        self
    }

    pub fn with_variant(self, source: AssetId, language: &str, variant: AssetId) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.variants.insert((source, language.to_string()), variant);
        }
        self
    }

    pub fn asset_count(&self) -> usize {
        self.state.lock().map(|state| state.assets.len()).unwrap_or(0)
    }
}

impl AssetResolver for MemoryAssetResolver {
    fn lookup_by_url(&self, url: &str) -> Option<AssetId> {
        self.state.lock().ok()?.by_url.get(url).copied()
    }

    fn ensure_registered(&self, url: &str) -> Option<AssetId> {
        if !self.allow_registration {
            return None;
        }

        let mut state = self.state.lock().ok()?;
        if let Some(id) = state.by_url.get(url) {
            return Some(*id);
        }

        let id = state.next_id.max(1);
        if state.assets.contains_key(&id) {
            debug!("No free asset id left for {}", url);
            return None;
        }
        state.next_id = id.saturating_add(1);
        state.assets.insert(
            id,
            AssetRecord {
                url: url.to_string(),
                metadata: AssetMetadata::default(),
            },
        );
        state.by_url.insert(url.to_string(), id);
        debug!("Registered asset {} for {}", id, url);
        Some(id)
    }

    fn translated_variant(&self, asset: AssetId, language: Option<&str>) -> Option<AssetId> {
        let language = language?;
        self.state
            .lock()
            .ok()?
            .variants
            .get(&(asset, language.to_string()))
            .copied()
    }

    fn url_of(&self, asset: AssetId) -> Option<String> {
        Some(self.state.lock().ok()?.assets.get(&asset)?.url.clone())
    }

    fn metadata_of(&self, asset: AssetId) -> AssetMetadata {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.assets.get(&asset).map(|a| a.metadata.clone()))
            .unwrap_or_default()
    }
}

// ==================== Language ====================

/// Fixed request languages.
#[derive(Debug, Clone, Default)]
pub struct StaticLanguageContext {
    current: Option<String>,
    default: Option<String>,
}

impl StaticLanguageContext {
    pub fn new(current: Option<&str>, default: Option<&str>) -> Self {
        Self {
            current: current.map(str::to_string),
            default: default.map(str::to_string),
        }
    }
}

impl LanguageContext for StaticLanguageContext {
    fn current_language(&self) -> Option<String> {
        self.current.clone()
    }

    fn default_language(&self) -> Option<String> {
        self.default.clone()
    }
}
