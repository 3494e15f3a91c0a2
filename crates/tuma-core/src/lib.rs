// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tuma dispatch bot.
//!
//! This crate provides the error taxonomy, domain record types, and the
//! outbound `ChatSender` seam used throughout the Tuma workspace.

pub mod error;
pub mod money;
pub mod phone;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TumaError;
pub use money::round2;
pub use phone::{mask_phone, normalize_phone};
pub use traits::ChatSender;
pub use types::{now_rfc3339, Rating, Report, RiderProfile, Trip, TripStatus, User, UserRole};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuma_error_has_all_variants() {
        let _config = TumaError::Config("test".into());
        let _storage = TumaError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = TumaError::Channel {
            message: "test".into(),
            source: None,
        };
        let _validation = TumaError::Validation("test".into());
        let _not_found = TumaError::NotFound("trip".into());
        let _internal = TumaError::Internal("test".into());
    }

    #[test]
    fn role_serialization() {
        let role = UserRole::Rider;
        let json = serde_json::to_string(&role).expect("should serialize");
        let parsed: UserRole = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(role, parsed);
    }
}
