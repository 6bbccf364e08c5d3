// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AMQP client with background consumer workers.
//!
//! [`MqClient`] lazily opens one broker connection and one channel, reused
//! while healthy. Each [`MqClient::consume`] call spawns one independent
//! worker task that decodes deliveries and hands them to a callback; workers
//! stop on their message limit or when [`MqClient::close`] cancels them.
//!
//! The channel is not meant to be driven from multiple user threads at once;
//! publishing and declaring stay on the caller's task, or the caller
//! serializes them.

pub mod client;
pub mod consumer;
pub mod message;

pub use client::{MqClient, MqError, PublishOptions, QueueOptions};
pub use consumer::{ConsumeOptions, ConsumerHandle};
pub use message::MqMessage;
