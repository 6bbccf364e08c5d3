// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MqClient behavior that does not need a live broker.

use api_harness::config::{MqConfig, SecretStore};
use api_harness::mq::{MqClient, MqError, PublishOptions};

fn unreachable_config() -> MqConfig {
    MqConfig {
        host: "127.0.0.1".to_string(),
        port: 1, // nothing listens here
        user: "guest".to_string(),
        password_key: "MQ_PASSWORD".to_string(),
        virtual_host: "/".to_string(),
        heartbeat: 600,
    }
}

fn secrets() -> SecretStore {
    SecretStore::from_pairs([("MQ_PASSWORD", "guest")])
}

#[tokio::test]
async fn test_connection_refused_is_connect_error() {
    let client = MqClient::new(unreachable_config(), secrets());
    let err = client.connect().await.unwrap_err();
    assert!(matches!(err, MqError::Connect { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_missing_broker_password_is_config_error() {
    let client = MqClient::new(
        unreachable_config(),
        SecretStore::from_pairs::<_, String, String>([]),
    );
    let err = client.connect().await.unwrap_err();
    assert!(matches!(err, MqError::Config(_)), "got {err:?}");
}

#[tokio::test]
async fn test_publish_surfaces_connection_failure() {
    let client = MqClient::new(unreachable_config(), secrets());
    let err = client
        .publish("some-queue", "payload", PublishOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MqError::Connect { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_close_without_ever_connecting() {
    let client = MqClient::new(unreachable_config(), secrets());
    client.close().await;
    client.close().await;
}
