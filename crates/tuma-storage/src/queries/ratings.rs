// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rating persistence. The (trip, reviewer) pair is unique at the schema
//! level as a final guard behind the aggregator's precondition checks.

use rusqlite::params;
use tuma_core::TumaError;

use crate::database::{map_tr_err, Database};
use crate::models::Rating;

/// Insert a rating.
pub async fn create_rating(db: &Database, rating: &Rating) -> Result<(), TumaError> {
    let rating = rating.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO ratings (id, trip_id, reviewer_id, target_id, value, comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    rating.id,
                    rating.trip_id,
                    rating.reviewer_id,
                    rating.target_id,
                    rating.value,
                    rating.comment,
                    rating.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Whether this reviewer has already rated this trip.
pub async fn rating_exists(
    db: &Database,
    trip_id: &str,
    reviewer_id: &str,
) -> Result<bool, TumaError> {
    let trip_id = trip_id.to_string();
    let reviewer_id = reviewer_id.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM ratings WHERE trip_id = ?1 AND reviewer_id = ?2",
                params![trip_id, reviewer_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(map_tr_err)
}
