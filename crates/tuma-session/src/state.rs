// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-sender conversation state.

use std::time::Instant;

use tuma_core::UserRole;

use crate::credential::TemporaryCredential;

/// The current step of a multi-turn chat flow for one sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    AwaitingEmail,
    AwaitingName,
    AwaitingRole,
    AwaitingOtp,
    AwaitingRideConfirmation,
    // Reserved by the flow design; no handler enters these yet.
    AwaitingRiderDecision,
    AwaitingStatusUpdate,
    AwaitingRatingComment,
}

/// Conversation state for one sender, exclusively owned by the orchestrator
/// turn holding the session lock.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub stage: Stage,

    // Pending registration fields.
    pub pending_email: Option<String>,
    pub pending_name: Option<String>,
    pub pending_role: Option<UserRole>,
    pub credential: Option<TemporaryCredential>,

    // Pending trip fields.
    pub pending_pickup: Option<String>,
    pub pending_dropoff: Option<String>,
    pub pending_distance_km: Option<f64>,
    pub pending_fare: Option<f64>,

    /// Last time this sender was heard from, for idle eviction.
    pub last_activity: Instant,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            stage: Stage::Idle,
            pending_email: None,
            pending_name: None,
            pending_role: None,
            credential: None,
            pending_pickup: None,
            pending_dropoff: None,
            pending_distance_km: None,
            pending_fare: None,
            last_activity: Instant::now(),
        }
    }
}

impl ConversationState {
    /// Clear all pending fields and return to Idle.
    pub fn reset(&mut self) {
        let last_activity = self.last_activity;
        *self = Self::default();
        self.last_activity = last_activity;
    }

    /// Record activity from the sender.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}
