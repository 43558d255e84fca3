//! Content-addressed tweet identity.
//!
//! A tweet has no ID of its own; it is identified by a digest of where it was
//! published, when, and what it says. Readers fetching the same feed
//! independently must arrive at the same hash, so the format below is fixed.
//!
//! # Canonical form (`v1`)
//!
//! ```text
//! "twet-hash-v1" 0x00 len(url) ":" url 0x00 len(ts) ":" ts 0x00 len(text) ":" text
//! ```
//!
//! - `len(..)` is the decimal byte length of the field that follows.
//! - `ts` is the instant in UTC as RFC 3339 with a `Z` suffix, seconds
//!   precision, plus the fractional part only when it is non-zero
//!   (`2024-01-01T12:00:00Z`, `2024-01-01T12:00:00.250Z`).
//! - `text` is the tweet text exactly as it appeared after the first tab.
//!
//! The digest is SHA-256 over those bytes; the hash is the first
//! [`HASH_LEN`] lowercase hex characters.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::Tweet;

pub const HASH_VERSION: &str = "twet-hash-v1";

/// Width of the printable hash in hex characters (48 bits).
pub const HASH_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(String);

impl Hash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Hash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Hash {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Hash {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

pub fn compute_hash(tweet: &Tweet) -> Hash {
    hash_parts(&tweet.source.url, &tweet.timestamp, &tweet.text)
}

pub fn hash_parts(url: &str, timestamp: &DateTime<Utc>, text: &str) -> Hash {
    let digest = Sha256::digest(canonical_bytes(url, timestamp, text));
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_LEN);
    Hash(encoded)
}

pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn canonical_bytes(url: &str, timestamp: &DateTime<Utc>, text: &str) -> Vec<u8> {
    let ts = canonical_timestamp(timestamp);
    let mut buf = Vec::with_capacity(HASH_VERSION.len() + url.len() + ts.len() + text.len() + 32);
    buf.extend_from_slice(HASH_VERSION.as_bytes());
    for field in [url, ts.as_str(), text] {
        buf.push(0);
        buf.extend_from_slice(field.len().to_string().as_bytes());
        buf.push(b':');
        buf.extend_from_slice(field.as_bytes());
    }
    buf
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::domain::FeedSource;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_hash_deterministic() {
        let h1 = hash_parts("https://example.com/twtxt.txt", &ts(1_700_000_000), "hello");
        let h2 = hash_parts("https://example.com/twtxt.txt", &ts(1_700_000_000), "hello");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_changes_with_each_field() {
        let base = hash_parts("https://example.com/twtxt.txt", &ts(1_700_000_000), "hello");
        assert_ne!(base, hash_parts("https://example.org/twtxt.txt", &ts(1_700_000_000), "hello"));
        assert_ne!(base, hash_parts("https://example.com/twtxt.txt", &ts(1_700_000_001), "hello"));
        assert_ne!(base, hash_parts("https://example.com/twtxt.txt", &ts(1_700_000_000), "hello!"));
    }

    #[test]
    fn test_hash_shape() {
        let h = hash_parts("https://example.com/twtxt.txt", &ts(0), "x");
        assert_eq!(h.as_str().len(), HASH_LEN);
        assert!(h.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        // Moving bytes between url and text must not produce the same input.
        let a = canonical_bytes("https://a.example/x", &ts(0), "yz");
        let b = canonical_bytes("https://a.example/xy", &ts(0), "z");
        assert_ne!(a, b);
    }

    #[test]
    fn test_canonical_layout() {
        let bytes = canonical_bytes("u", &ts(0), "t");
        assert_eq!(bytes, b"twet-hash-v1\x001:u\x0020:1970-01-01T00:00:00Z\x001:t".to_vec());
    }

    #[test]
    fn test_same_instant_different_offset_same_hash() {
        let source = Arc::new(FeedSource::new("a", "https://a.example/twtxt.txt"));
        let utc = DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z").unwrap();
        let cet = DateTime::parse_from_rfc3339("2024-01-01T13:00:00+01:00").unwrap();
        let t1 = Tweet::new(source.clone(), utc, "hi");
        let t2 = Tweet::new(source, cet, "hi");
        assert_eq!(compute_hash(&t1), compute_hash(&t2));
    }

    #[test]
    fn test_nickname_does_not_affect_hash() {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z").unwrap();
        let t1 = Tweet::new(Arc::new(FeedSource::new("a", "https://x.example/t.txt")), ts, "hi");
        let t2 = Tweet::new(Arc::new(FeedSource::new("b", "https://x.example/t.txt")), ts, "hi");
        assert_eq!(t1.hash(), t2.hash());
    }
}
