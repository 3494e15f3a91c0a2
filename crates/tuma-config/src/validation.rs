// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, bounded OTP lengths, and
//! commission rates within [0, 1].

use crate::diagnostic::ConfigError;
use crate::model::TumaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TumaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate gateway.host is not empty and looks like an IP or hostname
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate fare policy
    if config.trips.base_fare_kes < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "trips.base_fare_kes must be non-negative, got {}",
                config.trips.base_fare_kes
            ),
        });
    }

    if config.trips.per_km_rate_kes < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "trips.per_km_rate_kes must be non-negative, got {}",
                config.trips.per_km_rate_kes
            ),
        });
    }

    if config.trips.min_distance_km == 0 {
        errors.push(ConfigError::Validation {
            message: "trips.min_distance_km must be at least 1".to_string(),
        });
    }

    if config.trips.min_distance_km > config.trips.max_distance_km {
        errors.push(ConfigError::Validation {
            message: format!(
                "trips.min_distance_km ({}) must not exceed trips.max_distance_km ({})",
                config.trips.min_distance_km, config.trips.max_distance_km
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.trips.rider_commission_rate) {
        errors.push(ConfigError::Validation {
            message: format!(
                "trips.rider_commission_rate must be within [0.0, 1.0], got {}",
                config.trips.rider_commission_rate
            ),
        });
    }

    // Validate OTP settings
    if !(4..=6).contains(&config.auth.otp_length) {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.otp_length must be between 4 and 6, got {}",
                config.auth.otp_length
            ),
        });
    }

    if config.auth.otp_ttl_minutes == 0 {
        errors.push(ConfigError::Validation {
            message: "auth.otp_ttl_minutes must be at least 1".to_string(),
        });
    }

    if config.auth.credential_ttl_minutes == 0 {
        errors.push(ConfigError::Validation {
            message: "auth.credential_ttl_minutes must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
