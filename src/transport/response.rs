// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structured response returned by [`TransportClient`](super::TransportClient).

use serde_json::Value;

/// Parsed HTTP response.
///
/// Some services under test return plain text for error paths; those come
/// back as `Raw` so assertions can still see the status and body without the
/// call failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Body parsed as JSON; the `data` field is already decrypted when
    /// encryption is enabled.
    Json { status: u16, body: Value },
    /// Body was not JSON-parseable (or decryption fell through).
    Raw { status: u16, text: String },
}

impl ApiResponse {
    pub fn status(&self) -> u16 {
        match self {
            ApiResponse::Json { status, .. } | ApiResponse::Raw { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// The JSON body, if there is one.
    pub fn json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json { body, .. } => Some(body),
            ApiResponse::Raw { .. } => None,
        }
    }

    /// The raw text body, if JSON parsing fell through.
    pub fn text(&self) -> Option<&str> {
        match self {
            ApiResponse::Raw { text, .. } => Some(text),
            ApiResponse::Json { .. } => None,
        }
    }
}
