// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-sender conversation state for the Tuma dispatch bot.
//!
//! One [`ConversationState`] per normalized sender phone, held in a
//! concurrent [`SessionStore`] with per-key locking and optional idle
//! eviction.

pub mod credential;
pub mod state;
pub mod store;

pub use credential::TemporaryCredential;
pub use state::{ConversationState, Stage};
pub use store::SessionStore;
