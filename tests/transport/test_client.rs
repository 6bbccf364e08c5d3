// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TransportClient behavior against a live in-process server.

use api_harness::config::{SecretStore, TransportConfig, AES_KEY_NAME};
use api_harness::crypto::{aes_cbc, CryptoEngine};
use api_harness::transport::{ApiResponse, RequestOptions, TransportClient, TransportError};
use serde_json::json;

use super::support::{self, AES_KEY};

fn client(base_url: &str, encrypt: bool) -> TransportClient {
    let secrets = SecretStore::from_pairs([(AES_KEY_NAME, AES_KEY)]);
    let config = TransportConfig::new(base_url).with_encryption(encrypt);
    TransportClient::new(config, CryptoEngine::new(secrets)).expect("client")
}

#[tokio::test]
async fn test_plain_body_goes_out_unmodified() {
    let server = support::start().await;
    let client = client(&server.base_url, false);

    let body = json!({"username": "a", "password": "p"});
    let response = client
        .post("/capture", RequestOptions::json(body.clone()))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(server.captured_body().unwrap(), body);
}

#[tokio::test]
async fn test_encrypted_body_is_an_envelope_on_the_wire() {
    let server = support::start().await;
    let client = client(&server.base_url, true);

    let body = json!({"username": "a", "password": "p"});
    client
        .post("/capture", RequestOptions::json(body.clone()))
        .await
        .unwrap();

    let wire = server.captured_body().unwrap();
    let obj = wire.as_object().unwrap();
    assert_eq!(obj.len(), 2, "wire body must be exactly data+timestamp: {wire}");
    assert!(obj["timestamp"].is_string());
    assert!(obj.get("password").is_none(), "credentials must not leak");

    // The envelope decrypts back to the original body.
    let token = obj["data"].as_str().unwrap();
    let plaintext = aes_cbc::decrypt(token, AES_KEY.as_bytes()).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&plaintext).unwrap(), body);
}

#[tokio::test]
async fn test_encrypted_response_data_is_decrypted() {
    let server = support::start().await;
    let client = client(&server.base_url, true);

    let response = client
        .get("/secure-data", RequestOptions::default())
        .await
        .unwrap();

    let body = response.json().unwrap();
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["token"], "abc123");
    assert_eq!(body["data"]["user_id"], 7);
}

#[tokio::test]
async fn test_disabled_encryption_leaves_data_field_alone() {
    let server = support::start().await;
    let client = client(&server.base_url, false);

    let response = client
        .get("/secure-data", RequestOptions::default())
        .await
        .unwrap();

    // Still ciphertext: no decryption without the flag.
    assert!(response.json().unwrap()["data"].is_string());
}

#[tokio::test]
async fn test_undecryptable_data_falls_back_to_raw() {
    let server = support::start().await;
    let client = client(&server.base_url, true);

    let response = client
        .get("/bad-secure", RequestOptions::default())
        .await
        .unwrap();

    match response {
        ApiResponse::Raw { status, text } => {
            assert_eq!(status, 200);
            assert!(text.contains("definitely-not-a-valid-token"));
        }
        other => panic!("expected raw fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_falls_back_to_raw() {
    let server = support::start().await;
    let client = client(&server.base_url, false);

    let response = client.get("/text", RequestOptions::default()).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), Some("plain text response"));
    assert!(response.json().is_none());
}

#[tokio::test]
async fn test_error_status_is_a_transport_error() {
    let server = support::start().await;
    let client = client(&server.base_url, false);

    let err = client
        .get("/fail", RequestOptions::default())
        .await
        .unwrap_err();

    match err {
        TransportError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Nothing listens here.
    let client = client("http://127.0.0.1:1", false);
    let err = client
        .get("/whatever", RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn test_path_without_leading_slash_still_resolves() {
    let server = support::start().await;
    let client = client(&server.base_url, false);

    let response = client.get("text", RequestOptions::default()).await.unwrap();
    assert_eq!(response.text(), Some("plain text response"));
}

#[tokio::test]
async fn test_missing_aes_key_fails_the_call_not_the_encryption() {
    let server = support::start().await;
    let config = TransportConfig::new(server.base_url.as_str()).with_encryption(true);
    let engine = CryptoEngine::new(SecretStore::from_pairs::<_, String, String>([]));
    let client = TransportClient::new(config, engine).unwrap();

    // No silent plaintext fallback: the call errors before anything is sent.
    let err = client
        .post("/capture", RequestOptions::json(json!({"k": 1})))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Crypto(_)), "got {err:?}");
    assert!(server.captured_body().is_none());
}
