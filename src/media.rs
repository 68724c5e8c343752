//! Media field translation.
//!
//! Shared by the schema walker (image and image-like file fields) and by the
//! fallback media scanner. A media reference is an object with a `path` and
//! optionally `mime`, `width` and `height`.

use crate::config::Config;
use crate::node::str_field;
use crate::path::NodePath;
use crate::providers::{AssetId, AssetResolver};
use crate::scope::RequestScope;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Marker H5P appends to files uploaded in the editor but not yet saved.
pub const TEMP_FILE_MARKER: &str = "#tmp";

/// Schemes whose URLs carry the data itself rather than point at a file.
const OPAQUE_SCHEMES: &[&str] = &["data", "blob", "mailto", "javascript"];

/// Path prefixes that are already relative to the H5P upload folder.
const KNOWN_PREFIXES: &[&str] = &["content/", "editor/", "libraries/"];

/// Resolve a media `path` to an absolute URL.
///
/// - absolute URLs pass through; protocol-relative ones take the site scheme
/// - `data:`, `blob:` and other non-hierarchical URIs never resolve
/// - root-relative paths resolve against the site origin
/// - paths already under a known upload prefix resolve against the content
///   base URL
/// - anything else lives in the content's own folder, which needs the
///   content identifier
pub fn resolve_media_url(path: &str, config: &Config, content_id: Option<u64>) -> Option<Url> {
    let path = path.trim();

    if path.starts_with("//") || path.starts_with('/') {
        return config.site_url.join(path).ok();
    }

    match Url::parse(path) {
        Ok(url) if url.cannot_be_a_base() || OPAQUE_SCHEMES.contains(&url.scheme()) => {
            return None
        }
        Ok(url) => return Some(url),
        Err(_) => {}
    }

    if KNOWN_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return config.content_base_url.join(path).ok();
    }

    let id = content_id?;
    config
        .content_base_url
        .join(&format!("content/{}/{}", id, path))
        .ok()
}

/// Replaces media references with their translated variants.
pub struct MediaTranslator<'a> {
    resolver: &'a dyn AssetResolver,
    config: &'a Config,
}

impl<'a> MediaTranslator<'a> {
    pub fn new(resolver: &'a dyn AssetResolver, config: &'a Config) -> Self {
        Self { resolver, config }
    }

    /// Translate one media reference in place. Returns whether it changed.
    pub fn translate(&self, node: &mut Value, scope: &RequestScope, at: &NodePath) -> bool {
        let Some(path) = str_field(node, "path").filter(|p| !p.trim().is_empty()) else {
            return false;
        };
        if path.contains(TEMP_FILE_MARKER) {
            debug!("Skipping temporary media at {}: {}", at.raw(), path);
            return false;
        }

        let Some(mut url) = resolve_media_url(path, self.config, scope.content_id) else {
            debug!("Cannot resolve media path at {}: {}", at.raw(), path);
            return false;
        };
        url.set_query(None);
        url.set_fragment(None);

        let Some(asset) = self.asset_for(url.as_str()) else {
            debug!("No asset known for {}", url);
            return false;
        };

        let Some(variant) = self
            .resolver
            .translated_variant(asset, scope.language.as_deref())
            .filter(|variant| *variant != asset)
        else {
            return false;
        };

        let Some(translated_url) = self.resolver.url_of(variant) else {
            warn!("Asset {} has no URL, leaving {} untranslated", variant, at.raw());
            return false;
        };
        if translated_url == path {
            return false;
        }

        let metadata = self.resolver.metadata_of(variant);
        let Some(fields) = node.as_object_mut() else {
            return false;
        };

        debug!("Media at {}: {} -> {}", at.raw(), url, translated_url);
        fields.insert("path".to_string(), Value::String(translated_url));

        if let Some(mime) = metadata.mime {
            if fields.contains_key("mime") {
                fields.insert("mime".to_string(), Value::String(mime));
            }
        }
        if let Some(width) = metadata.width {
            if fields.contains_key("width") {
                fields.insert("width".to_string(), Value::from(width));
            }
        }
        if let Some(height) = metadata.height {
            if fields.contains_key("height") {
                fields.insert("height".to_string(), Value::from(height));
            }
        }

        true
    }

    fn asset_for(&self, url: &str) -> Option<AssetId> {
        if let Some(asset) = self.resolver.lookup_by_url(url) {
            return Some(asset);
        }
        if !self.config.register_missing_assets {
            return None;
        }
        self.resolver.ensure_registered(url)
    }
}
