// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-lived, single-use secrets issued during chat-driven registration
//! in place of a user-chosen password.

use std::time::{Duration, Instant};

use rand::Rng;
use sha2::{Digest, Sha256};

const BASE62: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const MIN_SECRET_LEN: usize = 12;
const MAX_SECRET_LEN: usize = 16;

/// A hashed, expiring, single-use credential.
///
/// Only the SHA-256 of the secret is retained; the raw value never leaves
/// this module.
#[derive(Debug, Clone)]
pub struct TemporaryCredential {
    hashed_value: String,
    expires_at: Instant,
    used: bool,
}

impl TemporaryCredential {
    /// Generate a fresh credential valid for `ttl`, backed by a random
    /// 12-16 char base62 secret.
    pub fn generate(ttl: Duration) -> Self {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(MIN_SECRET_LEN..=MAX_SECRET_LEN);
        let secret: String = (0..len)
            .map(|_| BASE62[rng.gen_range(0..BASE62.len())] as char)
            .collect();

        Self {
            hashed_value: hash_secret(&secret),
            expires_at: Instant::now() + ttl,
            used: false,
        }
    }

    /// Whether the credential's lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Whether the credential has already been consumed.
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Consume the credential. Fails when expired or already used.
    pub fn consume(&mut self) -> bool {
        if self.used || self.is_expired() {
            return false;
        }
        self.used = true;
        true
    }

    /// The SHA-256 hex of the secret, usable as a log fingerprint.
    pub fn hashed_value(&self) -> &str {
        &self.hashed_value
    }
}

fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
