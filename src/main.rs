//! Translate an H5P parameters document from the command line.
//!
//! Usage:
//!   h5p-translate <content.json> "<library> <major>.<minor>" [content-id]
//!
//! Required environment variables:
//! - H5P_LIBRARIES_DIR (extracted libraries, `<name>-<major>.<minor>/semantics.json`)
//!
//! Optional:
//! - H5P_CATALOG (translation catalog JSON)
//! - H5P_ASSETS (asset manifest JSON)
//! - H5P_CURRENT_LANGUAGE, H5P_DEFAULT_LANGUAGE (defaults to en)
//! - H5P_SITE_URL, H5P_CONTENT_BASE_URL, H5P_FALLBACK_LIBRARIES

use anyhow::{bail, Context, Result};
use h5p_translator::providers::{
    load_asset_manifest, load_catalog, DirectorySchemaProvider, MemoryAssetResolver,
    MemoryTranslationProvider, StaticLanguageContext,
};
use h5p_translator::{Config, ContentTranslator, LibraryRef, SchemaCache};
use std::fs;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("h5p_translator=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("Usage: h5p-translate <content.json> \"<library> <major>.<minor>\" [content-id]");
    }

    let library: LibraryRef = args[1].parse()?;
    let content_id = match args.get(2) {
        Some(id) => Some(id.parse::<u64>().context("content id must be a number")?),
        None => None,
    };

    let config = Config::from_env()?;
    let libraries_dir = config
        .libraries_dir
        .clone()
        .context("H5P_LIBRARIES_DIR not set")?;

    let translations = Arc::new(match &config.catalog_file {
        Some(path) => load_catalog(path)?,
        None => MemoryTranslationProvider::new(),
    });
    let assets = match &config.assets_file {
        Some(path) => load_asset_manifest(path, config.register_missing_assets)?,
        None => MemoryAssetResolver::new(),
    };
    let language = StaticLanguageContext::new(
        config.current_language.as_deref(),
        config.default_language.as_deref(),
    );

    let document = fs::read_to_string(&args[0])
        .with_context(|| format!("Failed to read {}", args[0]))?;
    let mut document: serde_json::Value =
        serde_json::from_str(&document).context("Content is not valid JSON")?;

    let translator = ContentTranslator::new(
        config,
        Arc::new(SchemaCache::new(Arc::new(DirectorySchemaProvider::new(libraries_dir)))),
        translations.clone(),
        Arc::new(assets),
        Arc::new(language),
    );

    let report = translator.translate_content(
        &mut document,
        &library.name,
        library.major,
        library.minor,
        content_id,
    );

    for registration in translations.registrations() {
        info!(
            "Registered [{}] {}{}",
            registration.context,
            registration.name,
            if registration.allow_html { " (html)" } else { "" }
        );
    }
    info!("Report: {}", serde_json::to_string(&report)?);

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
