// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tuma dispatch bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tuma configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TumaConfig {
    /// Engine identity and logging settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// WhatsApp Cloud API settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Trip fare and earnings policy.
    #[serde(default)]
    pub trips: TripsConfig,

    /// Registration OTP and temporary credential settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Conversation session settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Engine identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Display name of the bot.
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_engine_name() -> String {
    "tuma".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("tuma").join("tuma.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("tuma.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// WhatsApp Cloud API configuration.
///
/// When `access_token` or `phone_number_id` is absent, the outbound client
/// degrades to redacted logging instead of attempting delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Graph API access token. `None` disables outbound delivery.
    #[serde(default)]
    pub access_token: Option<String>,

    /// WhatsApp Business phone number id used as the send endpoint.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Secret expected in the `hub.verify_token` webhook handshake.
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Base URL of the Graph API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Phone number notified when an issue report is filed.
    #[serde(default)]
    pub admin_phone: Option<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            verify_token: None,
            api_base_url: default_api_base_url(),
            admin_phone: None,
        }
    }
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com/v19.0".to_string()
}

/// Trip fare and earnings policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TripsConfig {
    /// Base fare in KES added to every trip.
    #[serde(default = "default_base_fare_kes")]
    pub base_fare_kes: f64,

    /// Per-kilometre rate in KES.
    #[serde(default = "default_per_km_rate_kes")]
    pub per_km_rate_kes: f64,

    /// Lower bound of the distance estimate in kilometres.
    #[serde(default = "default_min_distance_km")]
    pub min_distance_km: u32,

    /// Upper bound of the distance estimate in kilometres.
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: u32,

    /// Fraction of the fare credited to the rider on delivery (0.0-1.0).
    /// Default 1.0 credits the full fare.
    #[serde(default = "default_rider_commission_rate")]
    pub rider_commission_rate: f64,
}

impl Default for TripsConfig {
    fn default() -> Self {
        Self {
            base_fare_kes: default_base_fare_kes(),
            per_km_rate_kes: default_per_km_rate_kes(),
            min_distance_km: default_min_distance_km(),
            max_distance_km: default_max_distance_km(),
            rider_commission_rate: default_rider_commission_rate(),
        }
    }
}

fn default_base_fare_kes() -> f64 {
    150.0
}

fn default_per_km_rate_kes() -> f64 {
    65.0
}

fn default_min_distance_km() -> u32 {
    3
}

fn default_max_distance_km() -> u32 {
    20
}

fn default_rider_commission_rate() -> f64 {
    1.0
}

/// Registration OTP and temporary credential configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Number of digits in a registration OTP (4-6).
    #[serde(default = "default_otp_length")]
    pub otp_length: u32,

    /// Minutes before a pending OTP expires.
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: u64,

    /// Minutes before a chat-issued temporary credential expires.
    #[serde(default = "default_credential_ttl_minutes")]
    pub credential_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            otp_ttl_minutes: default_otp_ttl_minutes(),
            credential_ttl_minutes: default_credential_ttl_minutes(),
        }
    }
}

fn default_otp_length() -> u32 {
    6
}

fn default_otp_ttl_minutes() -> u64 {
    10
}

fn default_credential_ttl_minutes() -> u64 {
    10
}

/// Conversation session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds of inactivity before a mid-flow session is evicted.
    /// 0 disables eviction (sessions live for the process lifetime).
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl_secs(),
        }
    }
}

fn default_idle_ttl_secs() -> u64 {
    0
}
