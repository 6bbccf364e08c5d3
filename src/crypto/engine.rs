// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! [`CryptoEngine`]: the primitives bound to a secret store.
//!
//! Every operation resolves key material the same way: explicit argument
//! first, then the named secret in the store, then failure. There is no
//! unencrypted fallback anywhere.

use chrono::{SecondsFormat, Utc};
use tracing::warn;

use super::error::CryptoError;
use super::{aes_cbc, digest, rsa_oaep, rsa_sign};
use crate::config::{SecretStore, AES_KEY_NAME, RSA_PRIVATE_KEY_NAME, RSA_PUBLIC_KEY_NAME};

/// Symmetric/asymmetric encryption, signing and digests for the harness.
#[derive(Debug, Clone)]
pub struct CryptoEngine {
    secrets: SecretStore,
}

impl CryptoEngine {
    pub fn new(secrets: SecretStore) -> Self {
        Self { secrets }
    }

    /// Hex MD5 digest of `text`.
    pub fn md5_hex(&self, text: &str) -> String {
        digest::md5_hex(text)
    }

    /// RFC 3339 UTC timestamp used to stamp outgoing envelopes.
    pub fn timestamp(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn resolve(&self, explicit: Option<&str>, name: &str) -> Result<String, CryptoError> {
        match explicit {
            Some(value) => Ok(value.to_string()),
            None => Ok(self.secrets.get(name)?),
        }
    }

    /// AES-CBC encrypt; `key` overrides the `AES_SECRET_KEY` secret.
    pub fn encrypt_aes(&self, plaintext: &str, key: Option<&str>) -> Result<String, CryptoError> {
        let key = self.resolve(key, AES_KEY_NAME)?;
        aes_cbc::encrypt(plaintext, key.as_bytes())
    }

    /// AES-CBC decrypt; `key` overrides the `AES_SECRET_KEY` secret.
    pub fn decrypt_aes(&self, token: &str, key: Option<&str>) -> Result<String, CryptoError> {
        let key = self.resolve(key, AES_KEY_NAME)?;
        aes_cbc::decrypt(token, key.as_bytes())
    }

    /// RSA-OAEP encrypt; `public_pem` overrides the `RSA_PUBLIC_KEY` secret.
    pub fn encrypt_rsa(
        &self,
        plaintext: &str,
        public_pem: Option<&str>,
    ) -> Result<String, CryptoError> {
        let pem = self.resolve(public_pem, RSA_PUBLIC_KEY_NAME)?;
        rsa_oaep::encrypt(plaintext, &pem)
    }

    /// RSA-OAEP decrypt; `private_pem` overrides the `RSA_PRIVATE_KEY` secret.
    pub fn decrypt_rsa(
        &self,
        token: &str,
        private_pem: Option<&str>,
    ) -> Result<String, CryptoError> {
        let pem = self.resolve(private_pem, RSA_PRIVATE_KEY_NAME)?;
        rsa_oaep::decrypt(token, &pem)
    }

    /// SHA-256 + PKCS#1 v1.5 signature, base64-encoded.
    pub fn sign(&self, text: &str, private_pem: Option<&str>) -> Result<String, CryptoError> {
        let pem = self.resolve(private_pem, RSA_PRIVATE_KEY_NAME)?;
        rsa_sign::sign(text, &pem)
    }

    /// Verify a signature. Never errors: a missing key, like any other
    /// verification failure, logs a warning and returns `false`.
    pub fn verify(&self, text: &str, signature_b64: &str, public_pem: Option<&str>) -> bool {
        let pem = match self.resolve(public_pem, RSA_PUBLIC_KEY_NAME) {
            Ok(pem) => pem,
            Err(e) => {
                warn!("Signature verification failed: {e}");
                return false;
            }
        };
        rsa_sign::verify(text, signature_b64, &pem)
    }
}
