// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Tuma workspace.
//!
//! Persistent records store timestamps as RFC 3339 strings and enums in
//! their SCREAMING_SNAKE_CASE wire form (the strum `Display` output).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role a registered user holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Rider,
    Admin,
}

/// Status of a trip within its lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Requested,
    Accepted,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

/// A registered user (customer, rider, or admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Normalized phone number with a leading `+`.
    pub phone: String,
    pub role: UserRole,
    /// Pending one-time password, cleared on verification.
    pub otp: Option<String>,
    /// RFC 3339 expiry for the pending OTP.
    pub otp_expires_at: Option<String>,
    pub verified: bool,
    /// Running average of ratings received, two decimals, half-up.
    pub rating: f64,
    pub rating_count: i64,
    pub created_at: String,
}

/// A delivery trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub customer_id: String,
    /// `None` until a rider accepts.
    pub rider_id: Option<String>,
    pub pickup: String,
    pub dropoff: String,
    pub distance_km: f64,
    pub fare: f64,
    pub status: TripStatus,
    pub accepted_at: Option<String>,
    pub completed_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub created_at: String,
}

/// A rating left by one trip participant for the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub trip_id: String,
    pub reviewer_id: String,
    pub target_id: String,
    /// Integer score, 1 through 5.
    pub value: i64,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Aggregate stats maintained per rider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderProfile {
    pub user_id: String,
    pub total_trips: i64,
    pub total_earnings: f64,
    pub rating: f64,
    pub rating_count: i64,
}

/// An issue report filed against a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub trip_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
}

/// Current UTC time as an RFC 3339 string, the storage timestamp format.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
