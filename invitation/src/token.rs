//! Invitation token generation and hashing.
//!
//! The plaintext token only ever leaves the service inside the acceptance link.
//! Storage is keyed by its SHA-256 digest:
//!
//! ```text
//! invitation:<base64std(sha256(token))>
//! ```

use crate::constants::STORAGE_KEY_PREFIX;
use crate::providers::TokenGenerator;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes in a generated token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Production token generator backed by the thread-local CSPRNG.
///
/// Tokens are 256-bit random values encoded as base64url without padding
/// (43 characters), safe to embed in a query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
    /// Create a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TokenGenerator for SecureTokenGenerator {
    fn generate(&self) -> String {
        use rand::RngCore;

        let mut rng = rand::thread_rng();
        let mut random_bytes = [0u8; TOKEN_BYTES];
        rng.fill_bytes(&mut random_bytes);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
    }
}

/// Hash a token for storage and logging.
///
/// Equivalent to [`TokenHash::of`].
#[must_use]
pub fn hash_token(token: &str) -> TokenHash {
    TokenHash::of(token)
}

/// SHA-256 digest of a token, base64 (standard alphabet, padded) encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// Hash a plaintext token.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_invitation::token::TokenHash;
    ///
    /// let hash = TokenHash::of("T1");
    /// assert_eq!(hash, TokenHash::of("T1"));
    /// assert_eq!(hash.as_str().len(), 44);
    /// ```
    #[must_use]
    pub fn of(token: &str) -> Self {
        let digest = Sha256::digest(token.as_bytes());
        Self(base64::engine::general_purpose::STANDARD.encode(digest))
    }

    /// Encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which the invitation record is stored.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_token_shape() {
        let token = SecureTokenGenerator::new().generate();

        // 32 bytes base64url without padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let generator = SecureTokenGenerator::new();
        let tokens: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(TokenHash::of("T1"), TokenHash::of("T1"));
        assert_eq!(
            TokenHash::of("T1").storage_key(),
            TokenHash::of("T1").storage_key()
        );
    }

    #[test]
    fn test_hash_matches_known_digest() {
        // printf 'abc' | sha256sum | xxd -r -p | base64
        assert_eq!(
            TokenHash::of("abc").as_str(),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[test]
    fn test_hash_token_matches_storage_layout() {
        assert_eq!(
            hash_token("T1").storage_key(),
            "invitation:H5NgPbU7+tXJI5D3NdDLuGF7SrghSukcVmSj0emwCcg="
        );
    }

    #[test]
    fn test_distinct_tokens_hash_differently() {
        assert_ne!(TokenHash::of("T1"), TokenHash::of("T2"));
    }

    #[test]
    fn test_storage_key_is_namespaced() {
        let hash = TokenHash::of("abc");
        assert_eq!(
            hash.storage_key(),
            "invitation:ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }
}
