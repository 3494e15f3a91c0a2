// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account registration and rider queries.

pub mod registration;
pub mod riders;

pub use registration::RegistrationService;
pub use riders::RiderAccounts;
