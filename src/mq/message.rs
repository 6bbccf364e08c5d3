// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decoded message payloads.

use serde_json::Value;

use super::client::MqError;

/// Payload delivered to consumer callbacks and accepted by `publish`.
///
/// JSON is tried first when decoding; anything that does not parse comes
/// through as text so a single malformed producer cannot crash a consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum MqMessage {
    Json(Value),
    Text(String),
}

impl MqMessage {
    /// Decode a raw delivery body: JSON if it parses, lossy UTF-8 text
    /// otherwise.
    pub fn decode(raw: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(raw) {
            Ok(value) => MqMessage::Json(value),
            Err(_) => MqMessage::Text(String::from_utf8_lossy(raw).into_owned()),
        }
    }

    /// Wire bytes plus the matching content type.
    pub(crate) fn to_wire(&self) -> Result<(Vec<u8>, &'static str), MqError> {
        match self {
            MqMessage::Json(value) => Ok((serde_json::to_vec(value)?, "application/json")),
            MqMessage::Text(text) => Ok((text.clone().into_bytes(), "text/plain")),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            MqMessage::Json(value) => Some(value),
            MqMessage::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MqMessage::Text(text) => Some(text),
            MqMessage::Json(_) => None,
        }
    }

    /// Short preview for log lines.
    pub fn preview(&self, max_chars: usize) -> String {
        let rendered = match self {
            MqMessage::Json(value) => value.to_string(),
            MqMessage::Text(text) => text.clone(),
        };
        match rendered.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &rendered[..idx]),
            None => rendered,
        }
    }
}

impl From<Value> for MqMessage {
    fn from(value: Value) -> Self {
        MqMessage::Json(value)
    }
}

impl From<String> for MqMessage {
    fn from(text: String) -> Self {
        MqMessage::Text(text)
    }
}

impl From<&str> for MqMessage {
    fn from(text: &str) -> Self {
        MqMessage::Text(text.to_string())
    }
}
