// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! RSA-OAEP (SHA-256) public-key encryption over PEM-encoded keys.
//!
//! Both PKCS#8 (`BEGIN PUBLIC KEY` / `BEGIN PRIVATE KEY`) and PKCS#1
//! (`BEGIN RSA PUBLIC KEY` / `BEGIN RSA PRIVATE KEY`) PEM blocks are accepted.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::error;

use super::error::CryptoError;
use crate::config::{ConfigError, RSA_PRIVATE_KEY_NAME, RSA_PUBLIC_KEY_NAME};

pub(crate) fn parse_public_key(pem: &str) -> Result<RsaPublicKey, ConfigError> {
    match RsaPublicKey::from_public_key_pem(pem) {
        Ok(key) => Ok(key),
        Err(_) => RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| ConfigError::InvalidKeyMaterial {
            name: RSA_PUBLIC_KEY_NAME.to_string(),
            reason: e.to_string(),
        }),
    }
}

pub(crate) fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, ConfigError> {
    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(_) => {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| ConfigError::InvalidKeyMaterial {
                name: RSA_PRIVATE_KEY_NAME.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Encrypt `plaintext` under the public key, returning base64 ciphertext.
pub fn encrypt(plaintext: &str, public_pem: &str) -> Result<String, CryptoError> {
    let key = parse_public_key(public_pem)?;
    let mut rng = rand::thread_rng();
    let ciphertext = key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext.as_bytes())
        .map_err(|e| {
            error!("RSA encrypt failed: {e}");
            CryptoError::Encrypt {
                reason: e.to_string(),
            }
        })?;
    Ok(BASE64.encode(ciphertext))
}

/// Decrypt a base64 OAEP ciphertext with the private key.
pub fn decrypt(token: &str, private_pem: &str) -> Result<String, CryptoError> {
    let key = parse_private_key(private_pem)?;
    let raw = BASE64.decode(token).map_err(|e| {
        error!("RSA decrypt failed: token is not valid base64: {e}");
        CryptoError::MalformedToken {
            reason: format!("invalid base64: {e}"),
        }
    })?;
    let plaintext = key.decrypt(Oaep::new::<Sha256>(), &raw).map_err(|e| {
        error!("RSA decrypt failed: {e}");
        CryptoError::Decrypt {
            reason: e.to_string(),
        }
    })?;
    String::from_utf8(plaintext).map_err(|e| {
        error!("RSA decrypt failed: plaintext is not valid UTF-8: {e}");
        CryptoError::Decrypt {
            reason: format!("plaintext is not valid UTF-8: {e}"),
        }
    })
}
