use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Stable document identifier: the SHA-1 digest of a URL string, read as a
/// big-endian 160-bit integer and rendered in decimal.
///
/// Identical URL strings always map to the same identifier, which is what
/// lets anchor text on one page be credited to its link target without the
/// target ever being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn from_url(url: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(url.as_bytes());
        let digest = hasher.finalize();
        DocId(BigUint::from_bytes_be(&digest).to_str_radix(10))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocId {
    fn from(raw: String) -> Self {
        DocId(raw)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
