use crate::error::{Result as TranslatorResult, TranslatorError};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use url::Url;

/// Which documents get the schema-independent text scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackScope {
    All,
    Libraries(BTreeSet<String>),
}

impl FallbackScope {
    /// `*` (or an empty value) means every library; otherwise a comma list.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "*" {
            return FallbackScope::All;
        }

        FallbackScope::Libraries(
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn includes(&self, library_name: &str) -> bool {
        match self {
            FallbackScope::All => true,
            FallbackScope::Libraries(names) => names.contains(library_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Media URL resolution
    pub site_url: Url,
    pub content_base_url: Url,
    pub register_missing_assets: bool,

    // Fallback scanning
    pub fallback_libraries: FallbackScope,

    // Languages
    pub current_language: Option<String>,
    pub default_language: Option<String>,

    // Custom stylesheet
    pub custom_css_dir: Option<PathBuf>,
    pub custom_css_url: Option<String>,

    // Command-line data sources
    pub libraries_dir: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub assets_file: Option<PathBuf>,
}

fn parse_url(value: &str) -> TranslatorResult<Url> {
    // Base URLs are joined against, so they must end in a slash.
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{}/", value)
    };

    Url::parse(&normalized).map_err(|source| TranslatorError::InvalidUrl {
        url: value.to_string(),
        source,
    })
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Defaults for a site, with the H5P uploads folder under
    /// `wp-content/uploads/h5p`.
    pub fn new(site_url: &str) -> TranslatorResult<Self> {
        let site_url = parse_url(site_url)?;
        let content_base_url = site_url
            .join("wp-content/uploads/h5p/")
            .map_err(|source| TranslatorError::InvalidUrl {
                url: site_url.to_string(),
                source,
            })?;

        Ok(Self {
            site_url,
            content_base_url,
            register_missing_assets: true,
            fallback_libraries: FallbackScope::All,
            current_language: None,
            default_language: Some("en".to_string()),
            custom_css_dir: None,
            custom_css_url: None,
            libraries_dir: None,
            catalog_file: None,
            assets_file: None,
        })
    }

    pub fn with_content_base_url(mut self, url: &str) -> TranslatorResult<Self> {
        self.content_base_url = parse_url(url)?;
        Ok(self)
    }

    pub fn from_env() -> Result<Self> {
        let site = std::env::var("H5P_SITE_URL").unwrap_or_else(|_| "http://localhost".to_string());
        let mut config = Self::new(&site).context("H5P_SITE_URL is not a valid URL")?;

        if let Some(base) = env_opt("H5P_CONTENT_BASE_URL") {
            config = config
                .with_content_base_url(&base)
                .context("H5P_CONTENT_BASE_URL is not a valid URL")?;
        }

        config.register_missing_assets = env_flag("H5P_REGISTER_MISSING_ASSETS", true);
        config.fallback_libraries =
            FallbackScope::parse(&std::env::var("H5P_FALLBACK_LIBRARIES").unwrap_or_default());

        // Languages
        config.current_language = env_opt("H5P_CURRENT_LANGUAGE");
        config.default_language =
            Some(env_opt("H5P_DEFAULT_LANGUAGE").unwrap_or_else(|| "en".to_string()));

        // Custom stylesheet
        config.custom_css_dir = env_opt("H5P_CUSTOM_CSS_DIR").map(PathBuf::from);
        config.custom_css_url = env_opt("H5P_CUSTOM_CSS_URL");

        // Command-line data sources
        config.libraries_dir = env_opt("H5P_LIBRARIES_DIR").map(PathBuf::from);
        config.catalog_file = env_opt("H5P_CATALOG").map(PathBuf::from);
        config.assets_file = env_opt("H5P_ASSETS").map(PathBuf::from);

        Ok(config)
    }
}
