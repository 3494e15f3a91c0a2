// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tuma dispatch bot.

use thiserror::Error;

/// The primary error type used across all Tuma crates.
#[derive(Debug, Error)]
pub enum TumaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Outbound channel errors (transport failure, message format).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A domain precondition failed (role mismatch, invalid transition,
    /// duplicate rating, expired or used credential).
    #[error("{0}")]
    Validation(String),

    /// A referenced record does not exist or the caller may not see it.
    #[error("{0} not found")]
    NotFound(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TumaError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        TumaError::Validation(message.into())
    }

    /// Shorthand for a not-found failure naming the missing entity.
    pub fn not_found(entity: impl Into<String>) -> Self {
        TumaError::NotFound(entity.into())
    }
}
