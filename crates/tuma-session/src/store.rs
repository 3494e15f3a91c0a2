// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent session store keyed by normalized sender id.
//!
//! Get-or-create is atomic via the DashMap entry API; mutation happens
//! behind a per-key `tokio::Mutex` held for the whole handler turn, so the
//! multi-field [`ConversationState`] never sees interleaved updates for
//! the same sender. Different senders proceed in parallel.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::state::ConversationState;

/// Concurrent keyed store of per-sender conversation state.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<ConversationState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch-or-create the session for a normalized sender id.
    ///
    /// The caller locks the returned mutex for the duration of its turn.
    pub fn entry(&self, sender: &str) -> Arc<Mutex<ConversationState>> {
        self.sessions
            .entry(sender.to_string())
            .or_default()
            .clone()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `ttl`.
    ///
    /// Skips entries currently locked by an in-flight turn. Returns the
    /// number of sessions evicted.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|sender, session| {
            let Ok(state) = session.try_lock() else {
                return true;
            };
            if state.last_activity.elapsed() > ttl {
                tracing::debug!(sender = %tuma_core::mask_phone(sender), "evicting idle session");
                evicted += 1;
                false
            } else {
                true
            }
        });
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stage;

    #[tokio::test]
    async fn entry_creates_idle_session_once() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let session = store.entry("+254700000001");
        {
            let mut state = session.lock().await;
            assert_eq!(state.stage, Stage::Idle);
            state.stage = Stage::AwaitingEmail;
        }

        // Same sender maps to the same state.
        let again = store.entry("+254700000001");
        assert_eq!(again.lock().await.stage, Stage::AwaitingEmail);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn senders_are_isolated() {
        let store = SessionStore::new();
        store.entry("+254700000001").lock().await.stage = Stage::AwaitingOtp;

        let other = store.entry("+254700000002");
        assert_eq!(other.lock().await.stage, Stage::Idle);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn evict_idle_removes_only_stale_sessions() {
        let store = SessionStore::new();
        store.entry("+254700000001");
        store.entry("+254700000002").lock().await.touch();

        // Zero TTL treats everything as stale.
        let evicted = store.evict_idle(Duration::from_secs(0));
        assert_eq!(evicted, 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn evict_skips_locked_sessions() {
        let store = SessionStore::new();
        let session = store.entry("+254700000001");
        let _guard = session.lock().await;

        let evicted = store.evict_idle(Duration::from_secs(0));
        assert_eq!(evicted, 0);
        assert_eq!(store.len(), 1);
    }
}
