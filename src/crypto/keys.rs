//! Vault key tokens.
//!
//! A key is 32 random bytes handed around as a printable token
//! (URL-safe base64 with padding, 44 characters).  The engine never
//! stores it; callers pass the token into every encrypt/decrypt call
//! and it is parsed into a `VaultKey` only for the duration of that call.

use base64::engine::general_purpose::URL_SAFE as BASE64_URL;
use base64::Engine;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of a raw key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A parsed 32-byte key that zeroes its memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Generate a fresh key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Parse a printable key token.
    ///
    /// Surrounding whitespace is ignored so a line read from a key file
    /// can be passed straight in.  Returns `None` if the token is not
    /// valid URL-safe base64 or does not decode to exactly 32 bytes.
    pub fn parse(token: &str) -> Option<Self> {
        let decoded = Zeroizing::new(BASE64_URL.decode(token.trim()).ok()?);
        if decoded.len() != KEY_LEN {
            return None;
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Some(Self { bytes })
    }

    /// Encode the key as a printable token.
    pub fn to_token(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64_URL.encode(self.bytes))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_printable_and_fixed_length() {
        let token = VaultKey::generate().to_token();
        assert_eq!(token.len(), 44);
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='));
    }

    #[test]
    fn parse_roundtrips_generated_token() {
        let key = VaultKey::generate();
        let parsed = VaultKey::parse(&key.to_token()).unwrap();
        assert_eq!(parsed.as_bytes(), key.as_bytes());
    }

    #[test]
    fn parse_ignores_surrounding_whitespace() {
        let key = VaultKey::generate();
        let line = format!("  {}\n", key.to_token().as_str());
        assert!(VaultKey::parse(&line).is_some());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(VaultKey::parse("").is_none());
        assert!(VaultKey::parse("wrong-key").is_none());
        assert!(VaultKey::parse("not base64 at all!").is_none());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let short = BASE64_URL.encode([7u8; 16]);
        assert!(VaultKey::parse(&short).is_none());
    }

    #[test]
    fn generated_keys_differ() {
        let a = VaultKey::generate();
        let b = VaultKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
