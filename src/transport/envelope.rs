// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire envelope and the small pure helpers the client is built from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body shape on the wire when encryption is enabled.
///
/// `data` is base64(IV ‖ AES-CBC ciphertext) of the serialized JSON body;
/// `timestamp` is an RFC 3339 marker stamped at encryption time. The
/// symmetric key is never part of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub data: String,
    pub timestamp: String,
}

/// Join `path` onto `base_url`.
///
/// Deliberately minimal: a leading `/` concatenates directly, anything else
/// gets a single separating `/` inserted. Double or trailing slashes are
/// passed through untouched, matching what the services under test expect.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

/// Copy of `body` safe for logging: a top-level `password` field is masked.
/// The original value is never touched.
pub fn redact(body: &Value) -> Value {
    let mut copy = body.clone();
    if let Some(obj) = copy.as_object_mut() {
        if obj.contains_key("password") {
            obj.insert("password".to_string(), Value::String("***".to_string()));
        }
    }
    copy
}

/// First `max` characters of `text`, respecting char boundaries.
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
