// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fare and distance estimation.
//!
//! The distance heuristic is an approximation derived from the input
//! strings, not a geocoding call: it keeps the quote deterministic and
//! bounded while the conversation has nothing better to go on.

use tuma_config::model::TripsConfig;
use tuma_core::round2;

/// Deterministic fare quoting from the configured policy.
#[derive(Debug, Clone)]
pub struct FareEstimator {
    config: TripsConfig,
}

impl FareEstimator {
    pub fn new(config: TripsConfig) -> Self {
        Self { config }
    }

    /// Estimate trip distance in kilometres, bounded by the configured
    /// minimum and maximum.
    pub fn estimate_distance_km(&self, pickup: &str, dropoff: &str) -> f64 {
        let diff = pickup.chars().count().abs_diff(dropoff.chars().count()) as u32;
        let km = (diff + self.config.min_distance_km)
            .clamp(self.config.min_distance_km, self.config.max_distance_km);
        f64::from(km)
    }

    /// Quote a fare in KES for the given distance.
    pub fn estimate_fare(&self, distance_km: f64) -> f64 {
        round2(self.config.base_fare_kes + distance_km * self.config.per_km_rate_kes)
    }

    /// The share of a fare credited to the rider on delivery.
    pub fn rider_earnings(&self, fare: f64) -> f64 {
        round2(fare * self.config.rider_commission_rate)
    }
}
