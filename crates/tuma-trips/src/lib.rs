// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trip lifecycle, fare quoting, and issue reports.

pub mod fare;
pub mod lifecycle;
pub mod reports;

pub use fare::FareEstimator;
pub use lifecycle::{next_forward, TripLifecycle};
pub use reports::{ReportDesk, CHAT_REPORT_REASON};
