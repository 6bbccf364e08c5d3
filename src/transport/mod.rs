// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Encrypted HTTP transport.
//!
//! [`TransportClient`] wraps a reusable HTTP session: it resolves URLs against
//! the configured base, applies the AES envelope to JSON bodies when
//! encryption is enabled, logs redacted request/response pairs, and decrypts
//! `data` fields on the way back. Test code never builds an
//! [`Envelope`] by hand.

pub mod client;
pub mod envelope;
pub mod response;

pub use client::{RequestOptions, TransportClient, TransportError};
pub use envelope::Envelope;
pub use response::ApiResponse;
