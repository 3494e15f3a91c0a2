// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across the workspace.

use std::sync::Mutex;

use async_trait::async_trait;
use tuma_core::ChatSender;

/// A [`ChatSender`] that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(recipient, body)` pairs sent so far, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent body sent, if any.
    pub fn last_body(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, body)| body.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send_text(&self, recipient: &str, body: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), body.to_string()));
    }
}
