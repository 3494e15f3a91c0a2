// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender identifier normalization.

/// Normalize a phone number to its canonical form: trimmed, with a single
/// leading `+`.
///
/// Idempotent: normalizing twice yields the same string as normalizing once.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix('+') {
        format!("+{rest}")
    } else {
        format!("+{trimmed}")
    }
}

/// Mask a recipient identifier down to its last 4 characters for logging.
pub fn mask_phone(phone: &str) -> String {
    let len = phone.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let visible: String = phone.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), visible)
}
