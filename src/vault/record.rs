//! The `Record` type stored in the vault.
//!
//! Each record holds its id, the site label, the username (plaintext),
//! and the encrypted secret.  The secret is a `Ciphertext`, which only
//! the cipher can produce.

use serde::Serialize;

use crate::crypto::Ciphertext;

/// A single stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Unique identifier, stable for the record's lifetime.
    pub id: i64,

    /// User-supplied label or address (e.g. "example.com").
    pub site: String,

    /// Stored in plaintext.
    pub username: String,

    /// The encrypted secret (nonce + ciphertext, base64 text).
    pub secret_ciphertext: Ciphertext,
}
