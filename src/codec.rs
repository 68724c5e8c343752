//! Translation slot names.
//!
//! Slot names are derived from stable paths and must stay within a bounded
//! length. Overlong paths are truncated and suffixed with a hash of the full
//! path, so two paths sharing a long prefix still get distinct names.

use sha2::{Digest, Sha256};

/// Maximum slot name length, in characters.
pub const MAX_SLOT_NAME_LEN: usize = 160;

/// Number of hex characters of the path hash appended on truncation.
pub const HASH_LEN: usize = 12;

/// Encodes paths into bounded-length slot names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameCodec {
    max_len: usize,
    hash_len: usize,
}

impl NameCodec {
    /// `hash_len` is clamped to the 64 hex characters a SHA-256 digest provides.
    pub fn new(max_len: usize, hash_len: usize) -> Self {
        Self {
            max_len,
            hash_len: hash_len.clamp(1, 64),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encode a path into a slot name. Pure and deterministic.
    pub fn encode(&self, path: &str) -> String {
        if path.chars().count() <= self.max_len {
            return path.to_string();
        }

        let hash = self.hash(path);
        let keep = self.max_len.saturating_sub(self.hash_len + 1);
        if keep < 1 {
            return format!("#{}", hash);
        }

        let prefix: String = path.chars().take(keep).collect();
        format!("{}#{}", prefix, hash)
    }

    fn hash(&self, path: &str) -> String {
        let digest = format!("{:x}", Sha256::digest(path.as_bytes()));
        digest[..self.hash_len].to_string()
    }
}

impl Default for NameCodec {
    fn default() -> Self {
        Self::new(MAX_SLOT_NAME_LEN, HASH_LEN)
    }
}

/// Encode with the default limits.
pub fn encode(path: &str) -> String {
    NameCodec::default().encode(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_path_unchanged() {
        assert_eq!(encode("H5P.Test 1.0.text"), "H5P.Test 1.0.text");
    }

    #[test]
    fn test_path_at_limit_unchanged() {
        let path = "a".repeat(MAX_SLOT_NAME_LEN);
        assert_eq!(encode(&path), path);
    }

    #[test]
    fn test_long_path_truncated_with_hash() {
        let path = "x".repeat(300);
        let name = encode(&path);

        assert_eq!(name.chars().count(), MAX_SLOT_NAME_LEN);
        let (prefix, hash) = name.rsplit_once('#').unwrap();
        assert_eq!(prefix, "x".repeat(MAX_SLOT_NAME_LEN - HASH_LEN - 1));
        assert_eq!(hash.len(), HASH_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_shared_prefix_does_not_collide() {
        let prefix = "p".repeat(148);
        let a = format!("{}{}", prefix, "-first-path-ending-goes-here-and-keeps-going");
        let b = format!("{}{}", prefix, "-second-path-ending-goes-here-and-keeps-going");

        assert_ne!(encode(&a), encode(&b));
    }

    #[test]
    fn test_multibyte_truncation_stays_on_char_boundary() {
        let path = "é".repeat(200);
        let name = encode(&path);
        assert_eq!(name.chars().count(), MAX_SLOT_NAME_LEN);
    }

    #[test]
    fn test_tiny_limit_returns_hash_only() {
        let codec = NameCodec::new(10, 12);
        let name = codec.encode("this path is longer than ten");
        assert!(name.starts_with('#'));
        assert_eq!(name.len(), 13);
    }

    proptest! {
        #[test]
        fn prop_encode_is_deterministic(path in ".{0,400}") {
            prop_assert_eq!(encode(&path), encode(&path));
        }

        #[test]
        fn prop_encode_is_bounded(path in ".{0,400}") {
            prop_assert!(encode(&path).chars().count() <= MAX_SLOT_NAME_LEN);
        }

        #[test]
        fn prop_distinct_long_paths_differ(tail_a in "[a-z]{20,40}", tail_b in "[a-z]{20,40}") {
            prop_assume!(tail_a != tail_b);
            let prefix = "s".repeat(150);
            let a = format!("{}{}", prefix, tail_a);
            let b = format!("{}{}", prefix, tail_b);
            prop_assert_ne!(encode(&a), encode(&b));
        }
    }
}
