// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cryptographic primitives for the harness encryption envelope.
//!
//! - **aes_cbc**: AES-CBC with PKCS#7 padding, base64(IV ‖ ciphertext) tokens
//! - **rsa_oaep**: RSA-OAEP (SHA-256) public-key encryption over PEM keys
//! - **rsa_sign**: SHA-256 + PKCS#1 v1.5 signatures
//! - **digest**: legacy MD5 hex digest
//! - **engine**: [`CryptoEngine`], which resolves key material from a
//!   [`SecretStore`](crate::config::SecretStore) when no explicit key is given
//!
//! Key resolution never falls back to an unencrypted path: a missing or
//! malformed key is a configuration error, not a no-op.

pub mod aes_cbc;
pub mod digest;
pub mod engine;
pub mod error;
pub mod rsa_oaep;
pub mod rsa_sign;

pub use digest::md5_hex;
pub use engine::CryptoEngine;
pub use error::CryptoError;
