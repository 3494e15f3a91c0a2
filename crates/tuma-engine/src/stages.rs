// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage handlers for mid-flow conversations.
//!
//! A stage handler consumes the raw text directly; only the commands a
//! stage expects (Otp, Confirm, Cancel) go back through the parser.
//! Unrecognized input re-prompts and preserves the stage.

use tuma_core::{mask_phone, TumaError, UserRole};
use tuma_parser::Command;
use tuma_session::{ConversationState, Stage, TemporaryCredential};

use crate::replies;
use crate::Engine;

impl Engine {
    pub(crate) fn on_email(&self, state: &mut ConversationState, text: &str) -> String {
        if !text.contains('@') {
            return replies::ASK_EMAIL_AGAIN.to_string();
        }
        state.pending_email = Some(text.to_string());
        state.stage = Stage::AwaitingName;
        replies::ASK_NAME.to_string()
    }

    pub(crate) fn on_name(&self, state: &mut ConversationState, text: &str) -> String {
        state.pending_name = Some(text.to_string());
        state.stage = Stage::AwaitingRole;
        replies::ASK_ROLE.to_string()
    }

    pub(crate) async fn on_role(
        &self,
        phone: &str,
        state: &mut ConversationState,
        text: &str,
    ) -> Result<String, TumaError> {
        let lowered = text.to_lowercase();
        let role = if lowered.contains("rider") {
            UserRole::Rider
        } else if lowered.contains("customer") || lowered.contains("deliver") {
            UserRole::Customer
        } else {
            return Ok(replies::ASK_ROLE_AGAIN.to_string());
        };

        let email = state
            .pending_email
            .clone()
            .ok_or_else(|| TumaError::Internal("registration flow lost its email".to_string()))?;
        let name = state
            .pending_name
            .clone()
            .ok_or_else(|| TumaError::Internal("registration flow lost its name".to_string()))?;

        // The credential gates the OTP step against stale flows; only its
        // hash ever leaves the session, as a log fingerprint.
        let credential = TemporaryCredential::generate(self.credential_ttl);

        match self.registration.begin(phone, &name, &email, role).await {
            Ok(_) => {
                tracing::debug!(
                    sender = %mask_phone(phone),
                    credential = credential.hashed_value(),
                    "registration pending verification"
                );
                state.pending_role = Some(role);
                state.credential = Some(credential);
                state.stage = Stage::AwaitingOtp;
                Ok(format!(
                    "Almost done, {name}! We've sent a verification code to this number. \
                     Reply with 'otp <code>' to finish."
                ))
            }
            Err(TumaError::Validation(message)) => {
                state.reset();
                Ok(format!("{message}. Send 'register' to start over."))
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn on_otp(
        &self,
        phone: &str,
        state: &mut ConversationState,
        text: &str,
    ) -> Result<String, TumaError> {
        let code = match tuma_parser::parse(text) {
            Command::Otp { code } => code,
            Command::Cancel => {
                state.reset();
                return Ok(replies::REGISTRATION_CANCELLED.to_string());
            }
            _ => return Ok(replies::ASK_OTP_AGAIN.to_string()),
        };

        let stale = match &state.credential {
            Some(credential) => credential.is_used() || credential.is_expired(),
            None => true,
        };
        if stale {
            state.reset();
            return Ok(replies::REGISTRATION_EXPIRED.to_string());
        }

        match self.registration.verify_otp(phone, &code).await {
            Ok(user) => {
                // Single use: the window may have closed while the code
                // was being verified.
                let consumed = state
                    .credential
                    .as_mut()
                    .is_some_and(|credential| credential.consume());
                if !consumed {
                    state.reset();
                    return Ok(replies::REGISTRATION_EXPIRED.to_string());
                }
                state.reset();
                let hint = match user.role {
                    UserRole::Rider => "You'll be offered trips to accept shortly.",
                    _ => "Book a delivery with 'ride from <pickup> to <dropoff>'.",
                };
                Ok(format!(
                    "You're all set, {}! Your account is verified. {hint}",
                    user.full_name
                ))
            }
            // Wrong or lapsed code: stay in the stage so the sender can
            // retry until the credential itself expires.
            Err(TumaError::Validation(message)) => {
                Ok(format!("{message}. Try again, or send 'cancel' to stop."))
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn on_confirmation(
        &self,
        phone: &str,
        state: &mut ConversationState,
        text: &str,
    ) -> Result<String, TumaError> {
        match tuma_parser::parse(text) {
            Command::Confirm => {
                let (pickup, dropoff, distance_km, fare) = match (
                    state.pending_pickup.clone(),
                    state.pending_dropoff.clone(),
                    state.pending_distance_km,
                    state.pending_fare,
                ) {
                    (Some(p), Some(d), Some(km), Some(fare)) => (p, d, km, fare),
                    _ => {
                        return Err(TumaError::Internal(
                            "ride confirmation lost its pending quote".to_string(),
                        ))
                    }
                };

                let customer = self.require_user(phone).await?;
                let trip = self
                    .trips
                    .create(&customer, &pickup, &dropoff, distance_km, fare)
                    .await?;
                state.reset();
                Ok(replies::trip_created(&trip))
            }
            Command::Cancel => {
                state.reset();
                Ok(replies::BOOKING_CANCELLED.to_string())
            }
            _ => {
                let quote = match (
                    &state.pending_pickup,
                    &state.pending_dropoff,
                    state.pending_distance_km,
                    state.pending_fare,
                ) {
                    (Some(p), Some(d), Some(km), Some(fare)) => {
                        replies::quote(p, d, km, fare)
                    }
                    _ => replies::DIDNT_UNDERSTAND.to_string(),
                };
                Ok(format!("Still waiting on your booking. {quote}"))
            }
        }
    }
}
