// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SHA-256 + PKCS#1 v1.5 signatures.
//!
//! [`sign`] follows the usual error contract. [`verify`] deliberately does
//! not: signature checks are routinely expected to fail in tests, so every
//! failure mode (missing key, bad base64, tampered signature) logs a warning
//! and returns `false` instead of erroring.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;
use tracing::{error, warn};

use super::error::CryptoError;
use super::rsa_oaep::{parse_private_key, parse_public_key};

/// Sign `text`, returning the base64-encoded signature.
pub fn sign(text: &str, private_pem: &str) -> Result<String, CryptoError> {
    let key = parse_private_key(private_pem)?;
    let signing_key = SigningKey::<Sha256>::new(key);
    let signature = signing_key.try_sign(text.as_bytes()).map_err(|e| {
        error!("RSA signing failed: {e}");
        CryptoError::Sign {
            reason: e.to_string(),
        }
    })?;
    Ok(BASE64.encode(signature.to_bytes()))
}

/// Verify a base64 signature over `text`. Never errors; any failure returns
/// `false` after logging a warning.
pub fn verify(text: &str, signature_b64: &str, public_pem: &str) -> bool {
    if signature_b64.is_empty() {
        warn!("Signature verification failed: empty signature");
        return false;
    }

    let key = match parse_public_key(public_pem) {
        Ok(key) => key,
        Err(e) => {
            warn!("Signature verification failed: {e}");
            return false;
        }
    };

    let raw = match BASE64.decode(signature_b64) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Signature verification failed: invalid base64: {e}");
            return false;
        }
    };

    let signature = match Signature::try_from(raw.as_slice()) {
        Ok(sig) => sig,
        Err(e) => {
            warn!("Signature verification failed: malformed signature: {e}");
            return false;
        }
    };

    let verifying_key = VerifyingKey::<Sha256>::new(key);
    match verifying_key.verify(text.as_bytes(), &signature) {
        Ok(()) => true,
        Err(e) => {
            warn!("Signature verification failed: {e}");
            false
        }
    }
}
