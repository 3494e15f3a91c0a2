// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation orchestrator.
//!
//! One [`Engine::handle_inbound`] call is one chat turn: normalize the
//! sender, lock their session, let the current stage consume the text if a
//! flow is mid-way, otherwise parse a command and dispatch to a domain
//! collaborator. Every outcome becomes a chat reply; no error escapes the
//! turn, and one sender's failure never touches another's session.

mod commands;
mod replies;
mod stages;

use std::sync::Arc;
use std::time::Duration;

use tuma_accounts::{RegistrationService, RiderAccounts};
use tuma_config::model::TumaConfig;
use tuma_core::{mask_phone, normalize_phone, ChatSender, TumaError, User};
use tuma_ratings::RatingAggregator;
use tuma_session::{ConversationState, SessionStore, Stage};
use tuma_storage::Database;
use tuma_trips::{FareEstimator, ReportDesk, TripLifecycle};

pub struct Engine {
    sessions: SessionStore,
    registration: RegistrationService,
    accounts: RiderAccounts,
    trips: TripLifecycle,
    reports: ReportDesk,
    ratings: RatingAggregator,
    fares: FareEstimator,
    sender: Arc<dyn ChatSender>,
    credential_ttl: Duration,
    admin_phone: Option<String>,
}

impl Engine {
    pub fn new(db: Arc<Database>, config: &TumaConfig, sender: Arc<dyn ChatSender>) -> Self {
        Self {
            sessions: SessionStore::new(),
            registration: RegistrationService::new(
                db.clone(),
                config.auth.clone(),
                sender.clone(),
            ),
            accounts: RiderAccounts::new(db.clone()),
            trips: TripLifecycle::new(db.clone(), config.trips.rider_commission_rate),
            reports: ReportDesk::new(db.clone()),
            ratings: RatingAggregator::new(db),
            fares: FareEstimator::new(config.trips.clone()),
            sender,
            credential_ttl: Duration::from_secs(config.auth.credential_ttl_minutes * 60),
            admin_phone: config.whatsapp.admin_phone.clone(),
        }
    }

    /// The session store, exposed so the host can drive idle eviction.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound message from `sender_id`.
    pub async fn handle_inbound(&self, sender_id: &str, text: &str) {
        let phone = normalize_phone(sender_id);
        let session = self.sessions.entry(&phone);
        let mut state = session.lock().await;
        state.touch();

        let text = text.trim();
        let reply = if text.is_empty() {
            replies::DIDNT_UNDERSTAND.to_string()
        } else {
            match self.dispatch(&phone, &mut state, text).await {
                Ok(reply) => reply,
                Err(e) => self.failure_reply(&phone, &mut state, e),
            }
        };

        self.sender.send_text(&phone, &reply).await;
    }

    /// Stage-first dispatch: a mid-flow stage consumes the text directly;
    /// the reserved stages and Idle fall through to command dispatch.
    async fn dispatch(
        &self,
        phone: &str,
        state: &mut ConversationState,
        text: &str,
    ) -> Result<String, TumaError> {
        match state.stage {
            Stage::AwaitingEmail => Ok(self.on_email(state, text)),
            Stage::AwaitingName => Ok(self.on_name(state, text)),
            Stage::AwaitingRole => self.on_role(phone, state, text).await,
            Stage::AwaitingOtp => self.on_otp(phone, state, text).await,
            Stage::AwaitingRideConfirmation => self.on_confirmation(phone, state, text).await,
            Stage::Idle
            | Stage::AwaitingRiderDecision
            | Stage::AwaitingStatusUpdate
            | Stage::AwaitingRatingComment => {
                self.on_command(phone, state, tuma_parser::parse(text)).await
            }
        }
    }

    /// Translate a domain failure into a chat reply per the error
    /// taxonomy. Unexpected failures are logged and reset the session.
    fn failure_reply(
        &self,
        phone: &str,
        state: &mut ConversationState,
        err: TumaError,
    ) -> String {
        match err {
            TumaError::Validation(message) => message,
            TumaError::NotFound(_) => replies::NOT_FOUND.to_string(),
            other => {
                tracing::error!(
                    sender = %mask_phone(phone),
                    error = %other,
                    "chat turn failed unexpectedly"
                );
                state.reset();
                replies::INTERNAL_ERROR.to_string()
            }
        }
    }

    /// Look up the verified account behind a sender phone.
    async fn require_user(&self, phone: &str) -> Result<User, TumaError> {
        let user = self
            .registration
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| TumaError::validation(replies::NOT_REGISTERED))?;
        if !user.verified {
            return Err(TumaError::validation(replies::NOT_VERIFIED));
        }
        Ok(user)
    }
}
