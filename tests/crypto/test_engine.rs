// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CryptoEngine key resolution against a secret store.

use api_harness::config::{SecretStore, AES_KEY_NAME, RSA_PRIVATE_KEY_NAME, RSA_PUBLIC_KEY_NAME};
use api_harness::crypto::{CryptoEngine, CryptoError};

use super::keys::{RSA_PRIVATE_PEM, RSA_PUBLIC_PEM};

fn full_engine() -> CryptoEngine {
    CryptoEngine::new(SecretStore::from_pairs([
        (AES_KEY_NAME, "0123456789abcdef0123456789abcdef"),
        (RSA_PUBLIC_KEY_NAME, RSA_PUBLIC_PEM),
        (RSA_PRIVATE_KEY_NAME, RSA_PRIVATE_PEM),
    ]))
}

#[test]
fn test_aes_roundtrip_through_store() {
    let engine = full_engine();
    let token = engine.encrypt_aes("{\"user\": \"a\"}", None).unwrap();
    assert_eq!(engine.decrypt_aes(&token, None).unwrap(), "{\"user\": \"a\"}");
}

#[test]
fn test_rsa_roundtrip_through_store() {
    let engine = full_engine();
    let token = engine.encrypt_rsa("asym payload", None).unwrap();
    assert_eq!(engine.decrypt_rsa(&token, None).unwrap(), "asym payload");
}

#[test]
fn test_sign_verify_through_store() {
    let engine = full_engine();
    let signature = engine.sign("to be signed", None).unwrap();
    assert!(engine.verify("to be signed", &signature, None));
    assert!(!engine.verify("different text", &signature, None));
}

#[test]
fn test_every_operation_fails_without_material() {
    let engine = CryptoEngine::new(SecretStore::from_pairs::<_, String, String>([]));

    assert!(matches!(
        engine.encrypt_aes("x", None).unwrap_err(),
        CryptoError::Config(_)
    ));
    assert!(matches!(
        engine.decrypt_aes("AAAA", None).unwrap_err(),
        CryptoError::Config(_)
    ));
    assert!(matches!(
        engine.encrypt_rsa("x", None).unwrap_err(),
        CryptoError::Config(_)
    ));
    assert!(matches!(
        engine.decrypt_rsa("AAAA", None).unwrap_err(),
        CryptoError::Config(_)
    ));
    assert!(matches!(
        engine.sign("x", None).unwrap_err(),
        CryptoError::Config(_)
    ));
    // verify is the one non-throwing operation
    assert!(!engine.verify("x", "AAAA", None));
}

#[test]
fn test_explicit_pem_overrides_store() {
    // Store holds no keys; explicit arguments must be enough.
    let engine = CryptoEngine::new(SecretStore::from_pairs::<_, String, String>([]));
    let token = engine.encrypt_rsa("explicit", Some(RSA_PUBLIC_PEM)).unwrap();
    assert_eq!(
        engine.decrypt_rsa(&token, Some(RSA_PRIVATE_PEM)).unwrap(),
        "explicit"
    );
}

#[test]
fn test_md5_digest() {
    let engine = full_engine();
    assert_eq!(engine.md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
}
