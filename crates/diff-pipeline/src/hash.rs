//! Short hex identifiers used as stand-in blob ids.

use sha2::{Digest, Sha256};

/// Hash `input` and keep the first `len` hex characters of the digest.
///
/// These ids only need to look like git abbreviations; they are not used
/// for integrity checks.
pub fn short_hash(input: &str, len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(len);
    digest
}
