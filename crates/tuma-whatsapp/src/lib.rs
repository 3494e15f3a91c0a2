// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Cloud API integration: outbound client and webhook types.

pub mod client;
pub mod webhook;

pub use client::WhatsAppClient;
pub use webhook::{InboundMessage, WebhookPayload};
