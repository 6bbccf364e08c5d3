// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-CBC envelope encryption with PKCS#7 padding.
//!
//! **Token format**:
//! ```text
//! base64( IV (16 bytes) | ciphertext )
//! ```
//!
//! A fresh random IV is generated for every encryption, so encrypting the same
//! plaintext twice yields different tokens. The key is raw bytes and must be
//! exactly 16, 24 or 32 bytes long; anything else is a configuration error,
//! never a silent fallback.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use tracing::error;

use super::error::CryptoError;
use crate::config::ConfigError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// IV length for AES-CBC, prepended to every ciphertext.
pub const IV_LEN: usize = 16;

fn validate_key(key: &[u8]) -> Result<(), ConfigError> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        other => Err(ConfigError::InvalidKeyLength { actual: other }),
    }
}

/// Encrypt `plaintext` under AES-CBC, returning base64(IV ‖ ciphertext).
pub fn encrypt(plaintext: &str, key: &[u8]) -> Result<String, CryptoError> {
    validate_key(key)?;

    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    // Key length already validated, so `new_from_slices` cannot fail here.
    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, &iv)
            .map_err(|e| CryptoError::Encrypt {
                reason: e.to_string(),
            })?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()),
        24 => Aes192CbcEnc::new_from_slices(key, &iv)
            .map_err(|e| CryptoError::Encrypt {
                reason: e.to_string(),
            })?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()),
        _ => Aes256CbcEnc::new_from_slices(key, &iv)
            .map_err(|e| CryptoError::Encrypt {
                reason: e.to_string(),
            })?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()),
    };

    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(out))
}

/// Decrypt a base64(IV ‖ ciphertext) token back to its UTF-8 plaintext.
pub fn decrypt(token: &str, key: &[u8]) -> Result<String, CryptoError> {
    validate_key(key)?;

    let raw = BASE64.decode(token).map_err(|e| {
        error!("AES decrypt failed: token is not valid base64: {e}");
        CryptoError::MalformedToken {
            reason: format!("invalid base64: {e}"),
        }
    })?;

    if raw.len() < IV_LEN {
        error!(
            "AES decrypt failed: payload too short ({} bytes, need at least {IV_LEN})",
            raw.len()
        );
        return Err(CryptoError::MalformedToken {
            reason: format!("payload too short: {} bytes", raw.len()),
        });
    }

    let (iv, ciphertext) = raw.split_at(IV_LEN);
    let plaintext = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|e| CryptoError::Decrypt {
                reason: e.to_string(),
            })?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => Aes192CbcDec::new_from_slices(key, iv)
            .map_err(|e| CryptoError::Decrypt {
                reason: e.to_string(),
            })?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|e| CryptoError::Decrypt {
                reason: e.to_string(),
            })?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    }
    .map_err(|_| {
        error!("AES decrypt failed: padding mismatch (wrong key or corrupted ciphertext)");
        CryptoError::Decrypt {
            reason: "padding mismatch (wrong key or corrupted ciphertext)".to_string(),
        }
    })?;

    String::from_utf8(plaintext).map_err(|e| {
        error!("AES decrypt failed: plaintext is not valid UTF-8: {e}");
        CryptoError::Decrypt {
            reason: format!("plaintext is not valid UTF-8: {e}"),
        }
    })
}
