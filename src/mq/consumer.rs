// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Background consumer workers.
//!
//! One worker task per `consume` call. The worker blocks on the delivery
//! stream until a message arrives, its message limit is hit, or its
//! cancellation token fires; [`MqClient::close`](super::MqClient::close) is
//! the only external cancellation path and joins with a bounded wait.

use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicCancelOptions};
use lapin::Channel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::message::MqMessage;

/// Callback invoked once per delivered message. An `Err` is logged and the
/// worker keeps consuming; one bad message never kills the loop.
pub type MessageCallback = Box<dyn FnMut(MqMessage) -> anyhow::Result<()> + Send>;

/// Settings for one `consume` call.
#[derive(Debug, Clone)]
pub struct ConsumeOptions {
    /// Broker-side auto-acknowledge. When `false` the worker acks each
    /// message after its callback succeeds.
    pub auto_ack: bool,
    /// Stop the worker after this many delivered messages.
    pub max_messages: Option<u64>,
}

impl Default for ConsumeOptions {
    fn default() -> Self {
        Self {
            auto_ack: true,
            max_messages: None,
        }
    }
}

impl ConsumeOptions {
    pub fn manual_ack() -> Self {
        Self {
            auto_ack: false,
            max_messages: None,
        }
    }

    pub fn with_max_messages(mut self, max: u64) -> Self {
        self.max_messages = Some(max);
        self
    }
}

struct ConsumerInner {
    queue: String,
    tag: String,
    stop: CancellationToken,
    received: Arc<AtomicU64>,
    join: Mutex<Option<JoinHandle<()>>>,
}

/// Handle to one background consumer worker.
///
/// Cloneable; the client keeps one clone for `close()` and returns another to
/// the caller.
#[derive(Clone)]
pub struct ConsumerHandle {
    inner: Arc<ConsumerInner>,
}

impl ConsumerHandle {
    pub(crate) fn new(
        queue: String,
        tag: String,
        stop: CancellationToken,
        received: Arc<AtomicU64>,
    ) -> Self {
        Self {
            inner: Arc::new(ConsumerInner {
                queue,
                tag,
                stop,
                received,
                join: Mutex::new(None),
            }),
        }
    }

    pub(crate) fn attach(&self, handle: JoinHandle<()>) {
        let mut guard = self.inner.join.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(handle);
    }

    pub fn queue(&self) -> &str {
        &self.inner.queue
    }

    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Messages delivered to the callback so far. Monotonically increasing.
    pub fn received(&self) -> u64 {
        self.inner.received.load(Ordering::SeqCst)
    }

    /// Request a cooperative stop. Returns immediately.
    pub fn stop(&self) {
        self.inner.stop.cancel();
    }

    pub fn is_finished(&self) -> bool {
        let guard = self.inner.join.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map_or(true, |handle| handle.is_finished())
    }

    /// Wait for the worker to exit, up to `timeout`. Returns `true` if it
    /// finished (or had already been joined) within the wait.
    pub async fn join(&self, timeout: Duration) -> bool {
        let handle = {
            let mut guard = self.inner.join.lock().unwrap_or_else(|e| e.into_inner());
            guard.take()
        };
        match handle {
            None => true,
            Some(handle) => tokio::time::timeout(timeout, handle).await.is_ok(),
        }
    }
}

/// The worker loop driven by a spawned task.
pub(crate) async fn run_consumer(
    mut consumer: lapin::Consumer,
    channel: Channel,
    queue: String,
    tag: String,
    mut callback: MessageCallback,
    options: ConsumeOptions,
    stop: CancellationToken,
    received: Arc<AtomicU64>,
) {
    info!(queue = %queue, tag = %tag, "consumer started");
    loop {
        let next = tokio::select! {
            _ = stop.cancelled() => {
                debug!(queue = %queue, "consumer stop requested");
                break;
            }
            next = consumer.next() => next,
        };

        let delivery = match next {
            None => {
                debug!(queue = %queue, "delivery stream ended");
                break;
            }
            Some(Err(e)) => {
                error!(queue = %queue, "broker error while consuming: {e}");
                break;
            }
            Some(Ok(delivery)) => delivery,
        };

        let message = MqMessage::decode(&delivery.data);
        let handled = callback(message);
        if let Err(e) = &handled {
            error!(queue = %queue, "message handler failed: {e:#}");
        }

        if !options.auto_ack && handled.is_ok() {
            if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                error!(queue = %queue, "ack failed: {e}");
            }
        }

        let count = received.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(max) = options.max_messages {
            if count >= max {
                info!(queue = %queue, count, "message limit reached, stopping consumer");
                if let Err(e) = channel
                    .basic_cancel(&tag, BasicCancelOptions::default())
                    .await
                {
                    debug!(queue = %queue, "basic_cancel after limit: {e}");
                }
                break;
            }
        }
    }
    info!(queue = %queue, tag = %tag, "consumer stopped");
}
