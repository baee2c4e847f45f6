//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption of secret fields (`cipher`)
//! - Key tokens and the zeroize-on-drop `VaultKey` (`keys`)
//! - Reading and writing the key material file (`keyfile`)

pub mod cipher;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, generate_key};
pub use cipher::{decrypt, encrypt, generate_key, Ciphertext};
pub use keyfile::{read_key_file, write_key_file};
pub use keys::VaultKey;
