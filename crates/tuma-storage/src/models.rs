// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `tuma-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use tuma_core::types::{Rating, Report, RiderProfile, Trip, TripStatus, User, UserRole};
