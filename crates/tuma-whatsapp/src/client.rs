// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound delivery over the WhatsApp Cloud API.
//!
//! Sending never propagates an error to the conversation: a failed or
//! unconfigured send is logged and the turn carries on. Log lines mask
//! recipient numbers and truncate bodies.

use async_trait::async_trait;
use serde_json::json;
use tuma_config::model::WhatsAppConfig;
use tuma_core::{mask_phone, ChatSender};

/// Longest body prefix written to log lines.
const LOG_BODY_LIMIT: usize = 80;

/// [`ChatSender`] backed by the Graph API `/messages` endpoint.
pub struct WhatsAppClient {
    config: WhatsAppConfig,
    http: reqwest::Client,
}

impl WhatsAppClient {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.config.access_token, &self.config.phone_number_id) {
            (Some(token), Some(phone_id)) => Some((token, phone_id)),
            _ => None,
        }
    }
}

#[async_trait]
impl ChatSender for WhatsAppClient {
    async fn send_text(&self, recipient: &str, body: &str) {
        let Some((token, phone_id)) = self.credentials() else {
            tracing::info!(
                recipient = %mask_phone(recipient),
                body = %truncate(body, LOG_BODY_LIMIT),
                "whatsapp not configured, message not delivered"
            );
            return;
        };

        let url = format!("{}/{}/messages", self.config.api_base_url, phone_id);
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": recipient.trim_start_matches('+'),
            "type": "text",
            "text": { "body": body },
        });

        let result = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(recipient = %mask_phone(recipient), "message delivered");
            }
            Ok(response) => {
                tracing::warn!(
                    recipient = %mask_phone(recipient),
                    status = %response.status(),
                    "whatsapp send rejected"
                );
            }
            Err(e) => {
                tracing::warn!(
                    recipient = %mask_phone(recipient),
                    error = %e,
                    "whatsapp send failed"
                );
            }
        }
    }
}

fn truncate(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
