//! H5P library identity and descriptor parsing.
//!
//! Polymorphic content slots carry a descriptor such as `"H5P.Image 1.1"`;
//! anything after the minor version is ignored.

use crate::error::{Result, TranslatorError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static DESCRIPTOR_REGEX: OnceLock<Regex> = OnceLock::new();

/// A library name plus major/minor version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRef {
    pub name: String,
    pub major: u32,
    pub minor: u32,
}

impl LibraryRef {
    pub fn new(name: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            name: name.into(),
            major,
            minor,
        }
    }

    /// Parse a `"<name> <major>.<minor>..."` descriptor.
    ///
    /// Returns `None` when the descriptor has no recognizable prefix; callers
    /// treat such slots as opaque.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let regex = DESCRIPTOR_REGEX
            .get_or_init(|| Regex::new(r"^(\S+)\s+(\d+)\.(\d+)").expect("descriptor regex"));

        let caps = regex.captures(descriptor)?;
        let major = caps.get(2)?.as_str().parse().ok()?;
        let minor = caps.get(3)?.as_str().parse().ok()?;

        Some(Self::new(caps.get(1)?.as_str(), major, minor))
    }

    /// Key used in raw/stable path segments and as the root path.
    pub fn key(&self) -> String {
        format!("{} {}.{}", self.name, self.major, self.minor)
    }

    /// Key used to memoize semantics lookups.
    pub fn cache_key(&self) -> String {
        format!("{}:{}.{}", self.name, self.major, self.minor)
    }
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.name, self.major, self.minor)
    }
}

impl FromStr for LibraryRef {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.trim()).ok_or_else(|| TranslatorError::InvalidLibrary(s.to_string()))
    }
}
