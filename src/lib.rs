// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core of an API test-automation harness:
//!
//! - **crypto**: AES-CBC envelope encryption, RSA-OAEP, PKCS#1 v1.5 signatures
//! - **transport**: HTTP client that applies the encryption envelope transparently
//! - **mq**: AMQP client with background consumer workers
//!
//! Test suites drive these clients directly; configuration-file loading, schema
//! validation and database assertions live outside this crate.

pub mod api;
pub mod config;
pub mod crypto;
pub mod logging;
pub mod mq;
pub mod transport;

pub use api::UserApi;
pub use config::{ConfigError, MqConfig, SecretStore, TransportConfig};
pub use crypto::{CryptoEngine, CryptoError};
pub use mq::{
    ConsumeOptions, ConsumerHandle, MqClient, MqError, MqMessage, PublishOptions, QueueOptions,
};
pub use transport::{ApiResponse, Envelope, RequestOptions, TransportClient, TransportError};
