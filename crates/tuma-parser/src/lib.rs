// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chat command grammar.
//!
//! Converts one inbound message string into a typed [`Command`] using an
//! ordered set of fixed patterns. First match wins, matching is
//! case-insensitive, and there are no side effects: the parser is a pure
//! function and safe to call concurrently.
//!
//! Grammar, in matching order:
//!
//! ```text
//! register | help | confirm | cancel | earnings|summary
//! otp <4-6 digits>
//! ride|deliver|delivery from <pickup> to <dropoff>
//! track|status <id>
//! report issue <id> <free text>
//! accept <id> | reject <id>
//! picked up|in transit|delivered <id>
//! rate <id> <1-5> [<comment>]
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tuma_core::TripStatus;

/// A structured interpretation of one inbound chat message.
///
/// Produced fresh per message; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    Otp { code: String },
    RideRequest { pickup: String, dropoff: String },
    Confirm,
    Cancel,
    TrackTrip { trip_id: String },
    ReportIssue { trip_id: String, message: String },
    AcceptTrip { trip_id: String },
    RejectTrip { trip_id: String },
    UpdateTripStatus { status: TripStatus, trip_id: String },
    RateTrip { trip_id: String, value: u8, comment: Option<String> },
    EarningsSummary,
    Help,
    Unknown,
}

/// Exact keyword commands, checked before any pattern rule.
const KEYWORDS: &[(&str, fn() -> Command)] = &[
    ("register", || Command::Register),
    ("help", || Command::Help),
    ("confirm", || Command::Confirm),
    ("cancel", || Command::Cancel),
    ("earnings", || Command::EarningsSummary),
    ("summary", || Command::EarningsSummary),
];

static OTP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^otp\s+(\d{4,6})$").unwrap());

static RIDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:ride|deliver|delivery)\s+from\s+(.+)\s+to\s+(.+)$").unwrap()
});

static TRACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:track|status)\s+([a-f0-9-]{8,})$").unwrap());

static REPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^report\s+issue\s+([a-f0-9-]{8,})\s+(.+)$").unwrap());

static ACCEPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^accept\s+([a-f0-9-]{8,})$").unwrap());

static REJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^reject\s+([a-f0-9-]{8,})$").unwrap());

static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(picked up|in transit|delivered)\s+([a-f0-9-]{8,})$").unwrap()
});

static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^rate\s+([a-f0-9-]{8,})\s+(\d)(?:\s+(.+))?$").unwrap()
});

/// Parse one message into a [`Command`].
///
/// Input is trimmed; blank input yields `Unknown`, as does anything the
/// grammar does not cover.
pub fn parse(text: &str) -> Command {
    let text = text.trim();
    if text.is_empty() {
        return Command::Unknown;
    }

    for (keyword, build) in KEYWORDS {
        if text.eq_ignore_ascii_case(keyword) {
            return build();
        }
    }

    if let Some(caps) = OTP_RE.captures(text) {
        return Command::Otp {
            code: caps[1].to_string(),
        };
    }

    if let Some(caps) = RIDE_RE.captures(text) {
        return Command::RideRequest {
            pickup: caps[1].trim().to_string(),
            dropoff: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = TRACK_RE.captures(text) {
        return Command::TrackTrip {
            trip_id: caps[1].to_lowercase(),
        };
    }

    if let Some(caps) = REPORT_RE.captures(text) {
        return Command::ReportIssue {
            trip_id: caps[1].to_lowercase(),
            message: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = ACCEPT_RE.captures(text) {
        return Command::AcceptTrip {
            trip_id: caps[1].to_lowercase(),
        };
    }

    if let Some(caps) = REJECT_RE.captures(text) {
        return Command::RejectTrip {
            trip_id: caps[1].to_lowercase(),
        };
    }

    if let Some(caps) = STATUS_RE.captures(text) {
        let status = match caps[1].to_lowercase().as_str() {
            "picked up" => TripStatus::PickedUp,
            "in transit" => TripStatus::InTransit,
            _ => TripStatus::Delivered,
        };
        return Command::UpdateTripStatus {
            status,
            trip_id: caps[2].to_lowercase(),
        };
    }

    if let Some(caps) = RATE_RE.captures(text) {
        // Single digit, parse cannot fail; range is enforced downstream.
        let value: u8 = caps[2].parse().unwrap_or(0);
        return Command::RateTrip {
            trip_id: caps[1].to_lowercase(),
            value,
            comment: caps.get(3).map(|m| m.as_str().trim().to_string()),
        };
    }

    Command::Unknown
}
