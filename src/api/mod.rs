// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed wrappers over [`TransportClient`](crate::TransportClient).
//!
//! One struct per service area; each method is a named endpoint call so test
//! cases read as intent, not as URL plumbing.

pub mod user;

pub use user::UserApi;
