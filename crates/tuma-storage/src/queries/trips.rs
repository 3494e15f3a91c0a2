// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trip CRUD and guarded status transitions.
//!
//! Transitions are conditional UPDATEs (`WHERE status = <expected>`) so a
//! concurrent transition for the same trip can win at most once; callers
//! observe the loss as `false` and report it as a validation failure.

use rusqlite::params;
use tuma_core::{TripStatus, TumaError};

use crate::database::{map_tr_err, Database};
use crate::models::Trip;
use crate::queries::parse_column;

const TRIP_COLUMNS: &str = "id, customer_id, rider_id, pickup, dropoff, distance_km, fare, \
                            status, accepted_at, completed_at, cancelled_at, created_at";

fn trip_from_row(row: &rusqlite::Row<'_>) -> Result<Trip, rusqlite::Error> {
    Ok(Trip {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        rider_id: row.get(2)?,
        pickup: row.get(3)?,
        dropoff: row.get(4)?,
        distance_km: row.get(5)?,
        fare: row.get(6)?,
        status: parse_column(7, row.get::<_, String>(7)?)?,
        accepted_at: row.get(8)?,
        completed_at: row.get(9)?,
        cancelled_at: row.get(10)?,
        created_at: row.get(11)?,
    })
}

/// Insert a new trip.
pub async fn create_trip(db: &Database, trip: &Trip) -> Result<(), TumaError> {
    let trip = trip.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO trips (id, customer_id, rider_id, pickup, dropoff, distance_km,
                                    fare, status, accepted_at, completed_at, cancelled_at,
                                    created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    trip.id,
                    trip.customer_id,
                    trip.rider_id,
                    trip.pickup,
                    trip.dropoff,
                    trip.distance_km,
                    trip.fare,
                    trip.status.to_string(),
                    trip.accepted_at,
                    trip.completed_at,
                    trip.cancelled_at,
                    trip.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a trip by id.
pub async fn get_trip(db: &Database, id: &str) -> Result<Option<Trip>, TumaError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], trip_from_row);
            match result {
                Ok(trip) => Ok(Some(trip)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Assign a rider to a REQUESTED trip and move it to ACCEPTED.
///
/// Returns `false` when the trip was not in REQUESTED (someone else already
/// accepted, or it was cancelled).
pub async fn assign_rider(
    db: &Database,
    trip_id: &str,
    rider_id: &str,
    accepted_at: &str,
) -> Result<bool, TumaError> {
    let trip_id = trip_id.to_string();
    let rider_id = rider_id.to_string();
    let accepted_at = accepted_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE trips SET rider_id = ?1, status = ?2, accepted_at = ?3
                 WHERE id = ?4 AND status = ?5 AND rider_id IS NULL",
                params![
                    rider_id,
                    TripStatus::Accepted.to_string(),
                    accepted_at,
                    trip_id,
                    TripStatus::Requested.to_string(),
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Move a trip from `from` to `to`, stamping `completed_at` when the target
/// is DELIVERED. Returns `false` when the trip was not in `from`.
pub async fn transition_status(
    db: &Database,
    trip_id: &str,
    from: TripStatus,
    to: TripStatus,
    completed_at: Option<String>,
) -> Result<bool, TumaError> {
    let trip_id = trip_id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE trips SET status = ?1,
                        completed_at = COALESCE(?2, completed_at)
                 WHERE id = ?3 AND status = ?4",
                params![to.to_string(), completed_at, trip_id, from.to_string()],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Cancel a trip, allowed only while REQUESTED or ACCEPTED.
///
/// Returns `false` when the trip had already progressed past ACCEPTED.
pub async fn cancel_trip(
    db: &Database,
    trip_id: &str,
    cancelled_at: &str,
) -> Result<bool, TumaError> {
    let trip_id = trip_id.to_string();
    let cancelled_at = cancelled_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE trips SET status = ?1, cancelled_at = ?2
                 WHERE id = ?3 AND status IN (?4, ?5)",
                params![
                    TripStatus::Cancelled.to_string(),
                    cancelled_at,
                    trip_id,
                    TripStatus::Requested.to_string(),
                    TripStatus::Accepted.to_string(),
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}
