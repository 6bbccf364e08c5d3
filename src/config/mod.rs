// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client configuration and secret resolution.
//!
//! The harness core consumes plain config structs; how they are loaded (YAML,
//! JSON, hand-built in a fixture) is the caller's business. Secret material
//! (AES key, RSA PEM blocks, broker password) is never part of a config file —
//! it is resolved by name from a [`SecretStore`].

pub mod secrets;

pub use secrets::SecretStore;

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Secret-store key holding the AES envelope key.
pub const AES_KEY_NAME: &str = "AES_SECRET_KEY";
/// Secret-store key holding the RSA public key PEM.
pub const RSA_PUBLIC_KEY_NAME: &str = "RSA_PUBLIC_KEY";
/// Secret-store key holding the RSA private key PEM.
pub const RSA_PRIVATE_KEY_NAME: &str = "RSA_PRIVATE_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required secret not configured: {name}")]
    MissingSecret { name: String },

    #[error("AES key length must be 16, 24 or 32 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    #[error("Invalid key material for {name}: {reason}")]
    InvalidKeyMaterial { name: String, reason: String },
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_port() -> u16 {
    5672
}

fn default_virtual_host() -> String {
    "/".to_string()
}

fn default_heartbeat() -> u16 {
    600
}

/// Per-environment settings for [`TransportClient`](crate::TransportClient).
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub encrypt_enabled: bool,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: default_timeout_secs(),
            headers: HashMap::new(),
            encrypt_enabled: false,
        }
    }

    pub fn with_encryption(mut self, enabled: bool) -> Self {
        self.encrypt_enabled = enabled;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Broker settings for [`MqClient`](crate::MqClient).
///
/// `password_key` names the secret-store entry holding the broker password;
/// the password itself never appears in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MqConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    pub password_key: String,
    #[serde(default = "default_virtual_host")]
    pub virtual_host: String,
    #[serde(default = "default_heartbeat")]
    pub heartbeat: u16,
}
