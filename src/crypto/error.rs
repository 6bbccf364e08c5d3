// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error type for cryptographic operations.
//!
//! Configuration problems (missing secret, bad key length, unparseable PEM)
//! surface as [`ConfigError`] wrapped in `CryptoError::Config` so callers can
//! tell "fix your environment" apart from "this ciphertext is bad". Signature
//! verification never produces an error at all; see
//! [`rsa_sign::verify`](super::rsa_sign::verify).

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Missing or malformed key material.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ciphertext token could not be decoded (bad base64, truncated payload).
    #[error("Malformed ciphertext token: {reason}")]
    MalformedToken { reason: String },

    #[error("Encryption failed: {reason}")]
    Encrypt { reason: String },

    /// Padding mismatch, wrong key, or non-UTF-8 plaintext.
    #[error("Decryption failed: {reason}")]
    Decrypt { reason: String },

    #[error("Signing failed: {reason}")]
    Sign { reason: String },
}
