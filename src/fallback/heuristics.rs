//! Heuristics deciding whether a string found without schema guidance is
//! human-readable text.

use regex::Regex;
use std::sync::OnceLock;

/// Property names whose values are never prose, compared case-insensitively.
const DENIED_KEYS: &[&str] = &[
    // references and identifiers
    "path", "mime", "library", "contentid", "subcontentid", "file", "files", "source", "src",
    "url", "href", "action", "id", "uuid",
    // coordinates and dimensions
    "x", "y", "z", "width", "height", "top", "left", "right", "bottom", "zindex", "scale",
    "rotation", "aspectratio",
    // colors
    "color", "backgroundcolor", "bordercolor", "fontcolor", "textcolor", "highlightcolor",
    // timing and telemetry
    "time", "duration", "starttime", "endtime", "timecode", "xapi",
    // metadata codes
    "license", "licenseversion", "contenttype",
];

/// Why a string was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    DeniedKey,
    Url,
    FileName,
    Color,
    Numeric,
    NoText,
    JsonLiteral,
}

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static FILE_REGEX: OnceLock<Regex> = OnceLock::new();
static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

pub fn is_denied_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    DENIED_KEYS.contains(&key.as_str())
}

/// Absolute (`scheme://`), protocol-relative, `mailto:` or `data:` URLs.
pub fn is_url(value: &str) -> bool {
    URL_REGEX
        .get_or_init(|| {
            Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|//|mailto:|data:)").expect("url regex")
        })
        .is_match(value)
}

/// A single whitespace-free token ending in a media or document extension.
pub fn is_file_name(value: &str) -> bool {
    FILE_REGEX
        .get_or_init(|| {
            Regex::new(
                r"(?i)^\S+\.(?:png|jpe?g|gif|svg|webp|bmp|tiff?|ico|avif|mp4|m4v|webm|ogg|ogv|mov|mp3|wav|m4a|aac|flac|pdf|docx?|xlsx?|pptx?|odt|ods|odp|txt|csv|zip|json|xml|vtt|srt|h5p)(?:\?\S*)?$",
            )
            .expect("file regex")
        })
        .is_match(value)
}

/// Hex, `rgb[a](...)` or `hsl[a](...)` color literals.
pub fn is_color(value: &str) -> bool {
    COLOR_REGEX
        .get_or_init(|| {
            Regex::new(
                r"(?i)^(?:#(?:[0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})|(?:rgba?|hsla?)\([^)]*\))$",
            )
            .expect("color regex")
        })
        .is_match(value)
}

pub fn is_numeric(value: &str) -> bool {
    NUMERIC_REGEX
        .get_or_init(|| {
            Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("numeric regex")
        })
        .is_match(value)
}

/// Whether nothing but tags and non-breaking spaces remain once markup is
/// stripped.
pub fn is_markup_only(value: &str) -> bool {
    let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag regex"));
    let stripped = regex.replace_all(value, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .is_empty()
}

/// A complete JSON object or array literal.
pub fn is_json_literal(value: &str) -> bool {
    let bracketed = (value.starts_with('{') && value.ends_with('}'))
        || (value.starts_with('[') && value.ends_with(']'));

    bracketed && serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// Why `value` (found under property `key`) should not be translated, or
/// `None` when it looks like prose.
pub fn skip_reason(key: Option<&str>, value: &str) -> Option<SkipReason> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(SkipReason::Blank);
    }
    if key.is_some_and(is_denied_key) {
        return Some(SkipReason::DeniedKey);
    }
    if is_url(trimmed) {
        return Some(SkipReason::Url);
    }
    if is_file_name(trimmed) {
        return Some(SkipReason::FileName);
    }
    if is_color(trimmed) {
        return Some(SkipReason::Color);
    }
    if is_numeric(trimmed) {
        return Some(SkipReason::Numeric);
    }
    if is_markup_only(trimmed) {
        return Some(SkipReason::NoText);
    }
    if is_json_literal(trimmed) {
        return Some(SkipReason::JsonLiteral);
    }
    None
}
