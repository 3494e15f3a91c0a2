// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tuma_whatsapp::WebhookPayload;

use crate::server::GatewayState;

/// Query parameters of the Meta webhook verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode", default)]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token", default)]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge", default)]
    pub challenge: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /whatsapp/webhook
///
/// Echoes `hub.challenge` only when the mode is `subscribe` and the
/// presented token matches the configured secret. An unconfigured secret
/// refuses every handshake.
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match handshake_challenge(&params, state.verify_token.as_deref()) {
        Some(challenge) => {
            tracing::info!("webhook verification handshake accepted");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            tracing::warn!("webhook verification handshake refused");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

pub(crate) fn handshake_challenge(
    params: &VerifyParams,
    configured_token: Option<&str>,
) -> Option<String> {
    let token = configured_token?;
    if params.mode.as_deref() != Some("subscribe") {
        return None;
    }
    if params.verify_token.as_deref() != Some(token) {
        return None;
    }
    params.challenge.clone()
}

/// POST /whatsapp/webhook
///
/// Acknowledges immediately; each inbound message is handled on its own
/// task so a slow turn never delays the 200 back to Meta.
pub async fn receive_webhook(
    State(state): State<GatewayState>,
    Json(payload): Json<WebhookPayload>,
) -> StatusCode {
    for message in payload.messages() {
        let Some(body) = message.body() else {
            continue;
        };
        let engine = state.engine.clone();
        let from = message.from.clone();
        let body = body.to_string();
        tokio::spawn(async move {
            engine.handle_inbound(&from, &body).await;
        });
    }
    StatusCode::OK
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
