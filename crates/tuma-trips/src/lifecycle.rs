// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trip lifecycle state machine.
//!
//! Forward progress follows REQUESTED -> ACCEPTED -> PICKED_UP ->
//! IN_TRANSIT -> DELIVERED, one step at a time. CANCELLED is reachable only
//! from REQUESTED or ACCEPTED and only by the owning customer. Each
//! transition is a single guarded storage call, so a concurrent transition
//! for the same trip can commit at most once.

use std::sync::Arc;

use tuma_core::types::now_rfc3339;
use tuma_core::{Trip, TripStatus, TumaError, User, UserRole};
use tuma_storage::queries::{rider_profiles, trips};
use tuma_storage::Database;

/// The next forward status for a given current status, per the transition
/// table. `None` for terminal or unassigned-forward states.
pub fn next_forward(status: TripStatus) -> Option<TripStatus> {
    match status {
        TripStatus::Requested => Some(TripStatus::Accepted),
        TripStatus::Accepted => Some(TripStatus::PickedUp),
        TripStatus::PickedUp => Some(TripStatus::InTransit),
        TripStatus::InTransit => Some(TripStatus::Delivered),
        TripStatus::Delivered | TripStatus::Cancelled => None,
    }
}

/// Enforces trip status transitions, actor authorization, and delivery
/// side effects.
pub struct TripLifecycle {
    db: Arc<Database>,
    /// Fraction of the fare credited to the rider on delivery.
    commission_rate: f64,
}

impl TripLifecycle {
    pub fn new(db: Arc<Database>, commission_rate: f64) -> Self {
        Self {
            db,
            commission_rate,
        }
    }

    /// Create a trip in REQUESTED. Only customers may request trips.
    pub async fn create(
        &self,
        customer: &User,
        pickup: &str,
        dropoff: &str,
        distance_km: f64,
        fare: f64,
    ) -> Result<Trip, TumaError> {
        if customer.role != UserRole::Customer {
            return Err(TumaError::validation("only customers can request trips"));
        }

        let trip = Trip {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            rider_id: None,
            pickup: pickup.to_string(),
            dropoff: dropoff.to_string(),
            distance_km,
            fare,
            status: TripStatus::Requested,
            accepted_at: None,
            completed_at: None,
            cancelled_at: None,
            created_at: now_rfc3339(),
        };
        trips::create_trip(&self.db, &trip).await?;

        tracing::info!(trip_id = %trip.id, "trip requested");
        Ok(trip)
    }

    /// Accept a REQUESTED trip as a rider.
    pub async fn accept(&self, trip_id: &str, rider: &User) -> Result<Trip, TumaError> {
        if rider.role != UserRole::Rider {
            return Err(TumaError::validation("only riders can accept trips"));
        }

        let trip = self.require_trip(trip_id).await?;
        if trip.status != TripStatus::Requested {
            return Err(TumaError::validation(
                "this trip is no longer awaiting a rider",
            ));
        }

        let applied = trips::assign_rider(&self.db, trip_id, &rider.id, &now_rfc3339()).await?;
        if !applied {
            // Lost the race to another rider.
            return Err(TumaError::validation(
                "this trip is no longer awaiting a rider",
            ));
        }

        tracing::info!(trip_id, rider_id = %rider.id, "trip accepted");
        self.require_trip(trip_id).await
    }

    /// Advance a trip to `requested_status`.
    ///
    /// CANCELLED is handled separately via the owning-customer rule; any
    /// forward move must exactly match the transition table's next status
    /// and may only be made by the assigned rider or an admin.
    pub async fn advance(
        &self,
        trip_id: &str,
        actor: &User,
        requested_status: TripStatus,
    ) -> Result<Trip, TumaError> {
        if requested_status == TripStatus::Cancelled {
            return self.cancel(trip_id, actor).await;
        }

        let trip = self.require_trip(trip_id).await?;

        let assigned_rider = trip.rider_id.as_deref() == Some(actor.id.as_str());
        if !assigned_rider && actor.role != UserRole::Admin {
            return Err(TumaError::validation(
                "only the assigned rider can update this trip",
            ));
        }

        let expected_next = next_forward(trip.status);
        if expected_next != Some(requested_status) {
            return Err(TumaError::validation(format!(
                "cannot move a {} trip to {}",
                trip.status, requested_status
            )));
        }

        let completed_at =
            (requested_status == TripStatus::Delivered).then(now_rfc3339);
        let applied = trips::transition_status(
            &self.db,
            trip_id,
            trip.status,
            requested_status,
            completed_at,
        )
        .await?;
        if !applied {
            return Err(TumaError::validation(format!(
                "cannot move a {} trip to {}",
                trip.status, requested_status
            )));
        }

        if requested_status == TripStatus::Delivered
            && let Some(rider_id) = &trip.rider_id
        {
            let earnings = tuma_core::round2(trip.fare * self.commission_rate);
            rider_profiles::record_delivery(&self.db, rider_id, earnings).await?;
            tracing::info!(trip_id, rider_id = %rider_id, earnings, "trip delivered");
        }

        self.require_trip(trip_id).await
    }

    /// Cancel a trip. Only the owning customer, and only while the trip is
    /// still REQUESTED or ACCEPTED.
    pub async fn cancel(&self, trip_id: &str, actor: &User) -> Result<Trip, TumaError> {
        let trip = self.require_trip(trip_id).await?;

        if trip.customer_id != actor.id {
            return Err(TumaError::validation(
                "only the customer who requested the trip can cancel it",
            ));
        }

        let applied = trips::cancel_trip(&self.db, trip_id, &now_rfc3339()).await?;
        if !applied {
            return Err(TumaError::validation(
                "this trip can no longer be cancelled",
            ));
        }

        tracing::info!(trip_id, "trip cancelled");
        self.require_trip(trip_id).await
    }

    /// Fetch a trip, visible only to its customer, its assigned rider, or
    /// an admin.
    pub async fn get_for_participant(
        &self,
        trip_id: &str,
        actor: &User,
    ) -> Result<Trip, TumaError> {
        let trip = self.require_trip(trip_id).await?;

        let participant = trip.customer_id == actor.id
            || trip.rider_id.as_deref() == Some(actor.id.as_str())
            || actor.role == UserRole::Admin;
        if !participant {
            return Err(TumaError::not_found("trip"));
        }

        Ok(trip)
    }

    async fn require_trip(&self, trip_id: &str) -> Result<Trip, TumaError> {
        trips::get_trip(&self.db, trip_id)
            .await?
            .ok_or_else(|| TumaError::not_found("trip"))
    }
}
