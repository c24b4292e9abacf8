//! Digests used to name evidence content in logs and reports.
//!
//! Content identity itself is byte equality; digests are only labels.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn sha256_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Fingerprint of an evidence payload.
pub fn content_fingerprint(data: &[u8]) -> String {
    sha256_digest(data)
}

/// First 16 hex characters of the fingerprint, for compact log fields.
pub fn short_fingerprint(data: &[u8]) -> String {
    let mut fp = content_fingerprint(data);
    fp.truncate(16);
    fp
}
