// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the orchestrator and its collaborators.

use async_trait::async_trait;

/// Best-effort outbound delivery of reply text to a chat recipient.
///
/// Implementations must never surface transport failures to the caller:
/// failures are logged and swallowed so a send can never roll back a state
/// transition that already committed.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Deliver `body` to `recipient` (a normalized phone number).
    async fn send_text(&self, recipient: &str, body: &str);
}
