// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook payload types for the WhatsApp Cloud API.
//!
//! Only the fields the engine consumes are modelled; everything else in
//! the notification is ignored during deserialization.

use serde::Deserialize;

/// Top-level webhook notification body.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
pub struct Change {
    pub value: ChangeValue,
}

#[derive(Debug, Deserialize)]
pub struct ChangeValue {
    /// Absent for status-update notifications.
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

/// A single inbound message from a user.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// Sender phone number in international format, without a `+`.
    pub from: String,
    pub text: Option<TextBody>,
    pub interactive: Option<Interactive>,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub body: String,
}

/// Reply to an interactive button or list message.
#[derive(Debug, Deserialize)]
pub struct Interactive {
    pub button_reply: Option<InteractiveReply>,
    pub list_reply: Option<InteractiveReply>,
}

#[derive(Debug, Deserialize)]
pub struct InteractiveReply {
    pub title: String,
}

impl InboundMessage {
    /// The user-visible text of this message: the text body, or the title
    /// of the tapped button or list row.
    pub fn body(&self) -> Option<&str> {
        if let Some(text) = &self.text {
            return Some(&text.body);
        }
        if let Some(interactive) = &self.interactive {
            if let Some(reply) = &interactive.button_reply {
                return Some(&reply.title);
            }
            if let Some(reply) = &interactive.list_reply {
                return Some(&reply.title);
            }
        }
        None
    }
}

impl WebhookPayload {
    /// Flatten all inbound messages across entries and changes.
    pub fn messages(&self) -> impl Iterator<Item = &InboundMessage> {
        self.entry
            .iter()
            .flat_map(|e| &e.changes)
            .flat_map(|c| &c.value.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_parses() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "object": "whatsapp_business_account",
                "entry": [{
                    "id": "1",
                    "changes": [{
                        "field": "messages",
                        "value": {
                            "messaging_product": "whatsapp",
                            "messages": [{
                                "from": "254700000001",
                                "id": "wamid.x",
                                "type": "text",
                                "text": { "body": "ride from A to B" }
                            }]
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();

        let messages: Vec<_> = payload.messages().collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "254700000001");
        assert_eq!(messages[0].body(), Some("ride from A to B"));
    }

    #[test]
    fn button_reply_uses_title() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "entry": [{
                    "changes": [{
                        "value": {
                            "messages": [{
                                "from": "254700000001",
                                "type": "interactive",
                                "interactive": {
                                    "type": "button_reply",
                                    "button_reply": { "id": "btn-1", "title": "Confirm" }
                                }
                            }]
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();

        let messages: Vec<_> = payload.messages().collect();
        assert_eq!(messages[0].body(), Some("Confirm"));
    }

    #[test]
    fn status_notification_has_no_messages() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "entry": [{
                    "changes": [{
                        "value": { "statuses": [{ "id": "wamid.x", "status": "delivered" }] }
                    }]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(payload.messages().count(), 0);
    }

    #[test]
    fn message_without_text_or_reply_has_no_body() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "entry": [{
                    "changes": [{
                        "value": {
                            "messages": [{ "from": "254700000001", "type": "image" }]
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();
        let messages: Vec<_> = payload.messages().collect();
        assert_eq!(messages[0].body(), None);
    }
}
