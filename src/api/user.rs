// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User-service endpoints.

use serde_json::{json, Value};
use tracing::info;

use crate::transport::{ApiResponse, RequestOptions, TransportClient, TransportError};

const BASE_PATH: &str = "/api/v1/user";

/// Endpoints of the user service under test.
pub struct UserApi {
    client: TransportClient,
}

impl UserApi {
    pub fn new(client: TransportClient) -> Self {
        Self { client }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse, TransportError> {
        info!(username, "logging in");
        let body = json!({ "username": username, "password": password });
        self.client
            .post(&format!("{BASE_PATH}/login"), RequestOptions::json(body))
            .await
    }

    pub async fn get_user_info(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<ApiResponse, TransportError> {
        info!(user_id, "fetching user info");
        let options = RequestOptions::default()
            .with_header("Authorization", format!("Bearer {token}"));
        self.client
            .get(&format!("{BASE_PATH}/{user_id}"), options)
            .await
    }

    pub async fn register(&self, user: &Value) -> Result<ApiResponse, TransportError> {
        info!(username = ?user.get("username"), "registering user");
        self.client
            .post(
                &format!("{BASE_PATH}/register"),
                RequestOptions::json(user.clone()),
            )
            .await
    }
}
