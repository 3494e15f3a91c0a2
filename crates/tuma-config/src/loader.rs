// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading via Figment.
//!
//! Compiled defaults sit at the bottom; `/etc/tuma/tuma.toml`, the XDG
//! user config, and `./tuma.toml` stack on top of them, and `TUMA_*`
//! environment variables win over everything.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TumaConfig;

/// Config sections, used to rewrite `TUMA_SECTION_KEY` env vars into
/// `section.key` figment paths.
const SECTIONS: [&str; 7] = [
    "engine", "gateway", "storage", "whatsapp", "trips", "auth", "session",
];

/// Load configuration from the standard file hierarchy plus env overrides.
pub fn load_config() -> Result<TumaConfig, figment::Error> {
    defaults()
        .merge(Toml::file("/etc/tuma/tuma.toml"))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file("tuma.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used by tests and for explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TumaConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load configuration from one specific file with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<TumaConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(TumaConfig::default()))
}

/// `~/.config/tuma/tuma.toml`, or an empty path when no config dir exists
/// (Toml::file silently skips missing files).
fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("tuma/tuma.toml"))
        .unwrap_or_default()
}

/// Map `TUMA_*` env vars onto config paths.
///
/// Only the leading section name becomes a dot; key names keep their own
/// underscores, so `TUMA_WHATSAPP_ACCESS_TOKEN` reads as
/// `whatsapp.access_token` rather than `whatsapp.access.token`.
fn env_provider() -> Env {
    Env::prefixed("TUMA_").map(|key| {
        // `key` arrives lowercased with the prefix stripped.
        let key = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key.strip_prefix(section)
                && let Some(rest) = rest.strip_prefix('_')
            {
                return format!("{section}.{rest}").into();
            }
        }
        key.into()
    })
}
