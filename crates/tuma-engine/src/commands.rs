// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch for senders with no flow in progress.

use tuma_core::{mask_phone, TumaError, UserRole};
use tuma_parser::Command;
use tuma_session::{ConversationState, Stage};

use crate::replies;
use crate::Engine;

impl Engine {
    pub(crate) async fn on_command(
        &self,
        phone: &str,
        state: &mut ConversationState,
        command: Command,
    ) -> Result<String, TumaError> {
        match command {
            Command::Register => self.on_register(phone, state).await,
            Command::Help => Ok(replies::help_text().to_string()),
            Command::Otp { .. } => Ok(replies::NO_PENDING_OTP.to_string()),
            Command::Confirm => Ok(replies::NOTHING_TO_CONFIRM.to_string()),
            Command::Cancel => Ok(replies::NOTHING_TO_CANCEL.to_string()),
            Command::RideRequest { pickup, dropoff } => {
                self.on_ride_request(phone, state, pickup, dropoff).await
            }
            Command::TrackTrip { trip_id } => {
                let user = self.require_user(phone).await?;
                let trip = self.trips.get_for_participant(&trip_id, &user).await?;
                Ok(replies::trip_status(&trip))
            }
            Command::AcceptTrip { trip_id } => {
                let user = self.require_user(phone).await?;
                let trip = self.trips.accept(&trip_id, &user).await?;
                Ok(replies::trip_accepted(&trip))
            }
            Command::RejectTrip { trip_id } => Ok(format!(
                "Noted, we'll offer trip {trip_id} to another rider."
            )),
            Command::UpdateTripStatus { status, trip_id } => {
                let user = self.require_user(phone).await?;
                let trip = self.trips.advance(&trip_id, &user, status).await?;
                Ok(replies::trip_advanced(&trip))
            }
            Command::RateTrip {
                trip_id,
                value,
                comment,
            } => {
                let user = self.require_user(phone).await?;
                self.ratings
                    .rate(&trip_id, &user, value, comment.as_deref())
                    .await?;
                Ok("Thanks for the feedback!".to_string())
            }
            Command::ReportIssue { trip_id, message } => {
                self.on_report(phone, trip_id, message).await
            }
            Command::EarningsSummary => {
                let user = self.require_user(phone).await?;
                let profile = self.accounts.earnings_summary(&user).await?;
                Ok(replies::earnings(&profile))
            }
            Command::Unknown => Ok(replies::DIDNT_UNDERSTAND.to_string()),
        }
    }

    async fn on_register(
        &self,
        phone: &str,
        state: &mut ConversationState,
    ) -> Result<String, TumaError> {
        if self.registration.find_by_phone(phone).await?.is_some() {
            state.reset();
            return Ok(replies::ALREADY_REGISTERED.to_string());
        }
        state.reset();
        state.stage = Stage::AwaitingEmail;
        Ok(replies::ASK_EMAIL.to_string())
    }

    async fn on_ride_request(
        &self,
        phone: &str,
        state: &mut ConversationState,
        pickup: String,
        dropoff: String,
    ) -> Result<String, TumaError> {
        let user = self.require_user(phone).await?;
        if user.role != UserRole::Customer {
            return Err(TumaError::validation("only customers can request trips"));
        }

        let distance_km = self.fares.estimate_distance_km(&pickup, &dropoff);
        let fare = self.fares.estimate_fare(distance_km);

        state.pending_pickup = Some(pickup.clone());
        state.pending_dropoff = Some(dropoff.clone());
        state.pending_distance_km = Some(distance_km);
        state.pending_fare = Some(fare);
        state.stage = Stage::AwaitingRideConfirmation;

        Ok(replies::quote(&pickup, &dropoff, distance_km, fare))
    }

    async fn on_report(
        &self,
        phone: &str,
        trip_id: String,
        message: String,
    ) -> Result<String, TumaError> {
        let user = self.require_user(phone).await?;
        let report = self.reports.file(&trip_id, &user, &message).await?;

        if let Some(admin) = &self.admin_phone {
            self.sender
                .send_text(
                    admin,
                    &format!(
                        "New issue report {} on trip {} from {}: {}",
                        report.id,
                        report.trip_id,
                        mask_phone(phone),
                        report.description
                    ),
                )
                .await;
        }
        Ok(replies::report_filed(&report.trip_id))
    }
}
