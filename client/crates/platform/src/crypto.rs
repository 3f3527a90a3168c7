//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use sha2::{Digest, Sha256};

/// Length of a token fingerprint in characters
pub const FINGERPRINT_LEN: usize = 12;

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short, log-safe fingerprint of a secret
///
/// URL-safe base64 of the SHA-256 digest, truncated. Identifies a token in
/// logs without revealing it.
pub fn fingerprint(secret: &[u8]) -> String {
    let mut encoded = general_purpose::URL_SAFE_NO_PAD.encode(sha256(secret));
    encoded.truncate(FINGERPRINT_LEN);
    encoded
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(sha256(b"hello").to_vec(), expected);
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint(b"eyJhbGciOiJIUzI1NiJ9.a.b");
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_eq!(a, fingerprint(b"eyJhbGciOiJIUzI1NiJ9.a.b"));
        assert_ne!(a, fingerprint(b"eyJhbGciOiJIUzI1NiJ9.a.c"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"token", b"token"));
        assert!(!constant_time_eq(b"token", b"tokem"));
        assert!(!constant_time_eq(b"token", b"token2"));
    }
}
