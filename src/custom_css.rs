//! Site-wide custom stylesheet appended to H5P embeds.

use crate::config::Config;
use crate::error::{Result, TranslatorError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FILE_NAME: &str = "h5p-custom.css";

/// A stylesheet reference as H5P passes it to the style alteration hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAsset {
    pub path: String,
    pub version: String,
}

/// Normalise line endings and trim.
pub fn sanitize_css(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

fn version_of(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("?ver={}", &digest[..8])
}

fn io_error(path: &Path, source: std::io::Error) -> TranslatorError {
    TranslatorError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Where the custom stylesheet lives on disk and how it is served.
#[derive(Debug, Clone)]
pub struct CustomCssStore {
    dir: PathBuf,
    base_url: String,
}

impl CustomCssStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }

    /// Store configured through `H5P_CUSTOM_CSS_DIR` and `H5P_CUSTOM_CSS_URL`.
    pub fn from_config(config: &Config) -> Option<Self> {
        match (&config.custom_css_dir, &config.custom_css_url) {
            (Some(dir), Some(url)) => Some(Self::new(dir.clone(), url.clone())),
            _ => None,
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), FILE_NAME)
    }

    /// Currently stored stylesheet, empty when none has been written.
    pub fn read(&self) -> String {
        fs::read_to_string(self.file_path()).unwrap_or_default()
    }

    /// Persist `css` (after sanitizing) and return its URL.
    ///
    /// An empty stylesheet removes the file and returns `None`. The file is
    /// only rewritten when its content changes.
    pub fn write(&self, css: &str) -> Result<Option<String>> {
        let css = sanitize_css(css);
        let path = self.file_path();

        if css.is_empty() {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
                info!("Removed custom stylesheet {}", path.display());
            }
            return Ok(None);
        }

        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        if self.read() != css {
            fs::write(&path, &css).map_err(|e| io_error(&path, e))?;
            info!("Wrote custom stylesheet {} ({} bytes)", path.display(), css.len());
        } else {
            debug!("Custom stylesheet unchanged");
        }

        Ok(Some(self.url()))
    }

    /// Append the custom stylesheet to the styles of an H5P embed.
    ///
    /// Adds at most one entry, and only when a non-empty stylesheet exists,
    /// at least one library is active and the list does not reference it yet.
    pub fn apply_custom_style_asset(
        &self,
        styles: &mut Vec<StyleAsset>,
        active_libraries: &[String],
        embed_type: &str,
    ) {
        if active_libraries.is_empty() {
            return;
        }

        let css = self.read();
        if css.trim().is_empty() {
            return;
        }

        let url = self.url();
        if styles.iter().any(|style| style.path == url) {
            return;
        }

        debug!("Adding custom stylesheet to {} embed", embed_type);
        styles.push(StyleAsset {
            path: url,
            version: version_of(&css),
        });
    }
}
