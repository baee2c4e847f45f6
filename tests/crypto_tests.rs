//! Integration tests for the Lockbox crypto module.

use lockbox::crypto::{decrypt, encrypt, generate_key, VaultKey};
use lockbox::errors::LockboxError;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = generate_key();
    let plaintexts = [
        "p@ss",
        "",
        "correct horse battery staple",
        "unicode: 密码 🔐",
        "line1\nline2\ttab",
    ];

    for p in plaintexts {
        let ct = encrypt(p, &key).expect("encrypt should succeed");
        let recovered = decrypt(&ct, &key).expect("decrypt should succeed");
        assert_eq!(recovered.as_str(), p);
    }
}

#[test]
fn long_plaintext_roundtrip() {
    let key = generate_key();
    let long = "x".repeat(64 * 1024);
    let ct = encrypt(&long, &key).unwrap();
    assert_eq!(decrypt(&ct, &key).unwrap().as_str(), long);
}

// ---------------------------------------------------------------------------
// Confidentiality
// ---------------------------------------------------------------------------

#[test]
fn ciphertext_is_not_plaintext() {
    let key = generate_key();
    for p in ["p@ss", "a", "hunter2hunter2hunter2"] {
        let ct = encrypt(p, &key).unwrap();
        assert_ne!(ct.as_str(), p);
        assert!(!ct.as_str().contains(p));
    }
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = generate_key();

    let ct1 = encrypt("SECRET=hello", &key).expect("encrypt 1");
    let ct2 = encrypt("SECRET=hello", &key).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
    assert_eq!(decrypt(&ct1, &key).unwrap(), decrypt(&ct2, &key).unwrap());
}

// ---------------------------------------------------------------------------
// Fail-closed decryption
// ---------------------------------------------------------------------------

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = generate_key();
    let ct = encrypt("TOP_SECRET=42", &key).unwrap();

    for _ in 0..20 {
        let other = generate_key();
        assert!(matches!(
            decrypt(&ct, &other),
            Err(LockboxError::InvalidKeyOrCiphertext)
        ));
    }
}

#[test]
fn decrypt_with_malformed_key_fails() {
    let key = generate_key();
    let ct = encrypt("p@ss", &key).unwrap();

    for bad in ["", "wrong-key", "  ", "AAAA"] {
        assert!(matches!(
            decrypt(&ct, bad),
            Err(LockboxError::InvalidKeyOrCiphertext)
        ));
    }
}

#[test]
fn wrong_key_error_message_does_not_blame_password() {
    let msg = LockboxError::InvalidKeyOrCiphertext.to_string();
    assert!(msg.to_lowercase().contains("cannot decrypt"));
    assert!(!msg.to_lowercase().contains("password"));
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

#[test]
fn generated_key_is_a_parseable_token() {
    let key = generate_key();
    assert_eq!(key.len(), 44);
    assert!(VaultKey::parse(&key).is_some());
}

#[test]
fn generated_keys_are_unique() {
    let a = generate_key();
    let b = generate_key();
    assert_ne!(a.as_str(), b.as_str());
}

#[test]
fn encrypt_rejects_malformed_key() {
    assert!(matches!(
        encrypt("p@ss", "not-a-key"),
        Err(LockboxError::InvalidInput(_))
    ));
}
