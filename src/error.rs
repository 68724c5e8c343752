use thiserror::Error;

/// Errors surfaced by the library outside of the traversal itself.
///
/// The traversal never fails: anything that goes wrong while walking a
/// document is logged and the affected subtree is left untranslated.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("Invalid library descriptor: '{0}'")]
    InvalidLibrary(String),

    #[error("Malformed semantics for {library}: {source}")]
    MalformedSemantics {
        library: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    MalformedFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
