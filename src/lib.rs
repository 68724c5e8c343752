//! Translation of H5P content parameters.
//!
//! Walks a parameters document alongside its library semantics, registers
//! every human-readable string under a stable, bounded-length slot name and
//! replaces it with its translation. Images are swapped for their
//! language-specific variants. A schema-independent fallback pass picks up
//! whatever the semantics do not cover.

pub mod codec;
pub mod config;
pub mod custom_css;
pub mod error;
pub mod fallback;
pub mod library;
pub mod media;
pub mod node;
pub mod path;
pub mod providers;
pub mod schema;
pub mod scope;
pub mod translator;
pub mod walker;

mod traversal;

pub use config::{Config, FallbackScope};
pub use error::{Result, TranslatorError};
pub use library::LibraryRef;
pub use path::NodePath;
pub use schema::{FieldKind, SchemaCache, SchemaField, Semantics};
pub use translator::ContentTranslator;
pub use traversal::{TranslatedNames, TranslationReport};
