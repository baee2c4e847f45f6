//! AES-256-GCM authenticated encryption of secret fields.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  The whole buffer is then encoded as
//! URL-safe base64 so it fits the `pwd TEXT` column.
//!
//! Layout of the decoded buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE as BASE64_URL;
use base64::Engine;
use serde::Serialize;
use zeroize::{Zeroize, Zeroizing};

use super::keys::VaultKey;
use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// An encrypted secret, as stored in the record table.
///
/// Only `encrypt` (and the store, when reading rows back) can build one,
/// so a plaintext can never end up in the secret column by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ciphertext(String);

impl Ciphertext {
    /// Wrap a value read back from storage.
    pub(crate) fn from_stored(text: String) -> Self {
        Self(text)
    }

    /// The encoded ciphertext text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Generate a fresh random key and return it as a printable token.
pub fn generate_key() -> Zeroizing<String> {
    VaultKey::generate().to_token()
}

/// Encrypt `plaintext` under the key token `key`.
///
/// Fails with `InvalidInput` if `key` is not a valid key token.
pub fn encrypt(plaintext: &str, key: &str) -> Result<Ciphertext> {
    let key = VaultKey::parse(key).ok_or_else(|| {
        LockboxError::InvalidInput("key is not a valid key token (see `lockbox keygen`)".into())
    })?;
    let sealed = seal(&key, plaintext.as_bytes())?;
    Ok(Ciphertext(BASE64_URL.encode(sealed)))
}

/// Decrypt a `Ciphertext` produced by `encrypt`.
///
/// A malformed key, a wrong key, and damaged data all fail with
/// `InvalidKeyOrCiphertext`.
pub fn decrypt(ciphertext: &Ciphertext, key: &str) -> Result<Zeroizing<String>> {
    let key = VaultKey::parse(key).ok_or(LockboxError::InvalidKeyOrCiphertext)?;
    let sealed = BASE64_URL
        .decode(ciphertext.as_str())
        .map_err(|_| LockboxError::InvalidKeyOrCiphertext)?;
    let plaintext = open(&key, &sealed)?;

    // Take ownership of the bytes; wipe them if they are not UTF-8.
    String::from_utf8(plaintext)
        .map(Zeroizing::new)
        .map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            LockboxError::InvalidKeyOrCiphertext
        })
}

/// Encrypt raw bytes, returning nonce || ciphertext.
fn seal(key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt nonce || ciphertext and verify the auth tag.
fn open(key: &VaultKey, sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(LockboxError::InvalidKeyOrCiphertext);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| LockboxError::InvalidKeyOrCiphertext)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::InvalidKeyOrCiphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_form_is_printable_text() {
        let key = generate_key();
        let ct = encrypt("p@ss", &key).unwrap();
        assert!(ct
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='));
    }

    #[test]
    fn stored_form_carries_nonce_and_tag() {
        let key = generate_key();
        let ct = encrypt("abc", &key).unwrap();
        let raw = BASE64_URL.decode(ct.as_str()).unwrap();
        assert_eq!(raw.len(), NONCE_LEN + 3 + TAG_LEN);
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let key = generate_key();
        let short = Ciphertext::from_stored(BASE64_URL.encode([0u8; NONCE_LEN]));
        assert!(matches!(
            decrypt(&short, &key),
            Err(LockboxError::InvalidKeyOrCiphertext)
        ));
    }

    #[test]
    fn non_base64_ciphertext_is_rejected() {
        let key = generate_key();
        let junk = Ciphertext::from_stored("%%% not base64 %%%".into());
        assert!(matches!(
            decrypt(&junk, &key),
            Err(LockboxError::InvalidKeyOrCiphertext)
        ));
    }

    #[test]
    fn malformed_key_on_encrypt_is_invalid_input() {
        assert!(matches!(
            encrypt("secret", "short"),
            Err(LockboxError::InvalidInput(_))
        ));
    }
}
