use sha2::{Digest, Sha256};

const DIGEST_PREFIX_BYTES: usize = 100;
const SHORT_DIGEST_LEN: usize = 6;

/// Six hex characters derived from the first 100 bytes of `bytes`.
/// Only used to tell filenames apart, never for integrity checks. SHA-256 is
/// stable across toolchains, so names stay reproducible.
pub fn short_digest(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(DIGEST_PREFIX_BYTES)];
    let digest = Sha256::digest(head);
    let mut encoded = hex::encode(digest);
    encoded.truncate(SHORT_DIGEST_LEN);
    encoded
}
