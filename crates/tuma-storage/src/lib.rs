// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Tuma dispatch bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD
//! operations for users, rider profiles, trips, ratings, and reports.
//!
//! All writes are serialized through the one background thread owned by
//! [`Database`]; query modules accept `&Database` and call through
//! `connection().call()`. Do not create additional connections for writes.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::*;
