// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Legacy MD5 digest, kept because the system under test still hashes a few
//! request fields with it. Not for anything security-sensitive.

use md5::{Digest, Md5};

/// Hex MD5 digest of the UTF-8 encoding of `text`.
pub fn md5_hex(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}
