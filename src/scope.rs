//! Per-request language and translation context.

use crate::providers::LanguageContext;

/// Prefix of every translation context string.
pub const CONTEXT_PREFIX: &str = "H5P Content";

/// Language and context shared by both walkers for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestScope {
    /// Active language, falling back to the default language.
    pub language: Option<String>,
    /// Context strings are registered under, keyed by content identity.
    pub context: String,
    pub content_id: Option<u64>,
}

impl RequestScope {
    pub fn resolve(language: &dyn LanguageContext, content_id: Option<u64>) -> Self {
        let language = language
            .current_language()
            .filter(|code| !code.is_empty())
            .or_else(|| language.default_language().filter(|code| !code.is_empty()));

        Self {
            language,
            context: context_for(content_id),
            content_id,
        }
    }
}

/// `"H5P Content <id>"`, or just the prefix without a content identity.
pub fn context_for(content_id: Option<u64>) -> String {
    match content_id {
        Some(id) => format!("{} {}", CONTEXT_PREFIX, id),
        None => CONTEXT_PREFIX.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaticLanguageContext;

    #[test]
    fn test_context_with_content_id() {
        assert_eq!(context_for(Some(42)), "H5P Content 42");
    }

    #[test]
    fn test_context_without_content_id() {
        assert_eq!(context_for(None), "H5P Content");
    }

    #[test]
    fn test_resolve_prefers_current_language() {
        let scope = RequestScope::resolve(&StaticLanguageContext::new(Some("fr"), Some("en")), Some(7));
        assert_eq!(scope.language.as_deref(), Some("fr"));
        assert_eq!(scope.context, "H5P Content 7");
        assert_eq!(scope.content_id, Some(7));
    }

    #[test]
    fn test_resolve_falls_back_to_default_language() {
        let scope = RequestScope::resolve(&StaticLanguageContext::new(Some(""), Some("en")), None);
        assert_eq!(scope.language.as_deref(), Some("en"));

        let scope = RequestScope::resolve(&StaticLanguageContext::new(None, None), None);
        assert!(scope.language.is_none());
    }
}
