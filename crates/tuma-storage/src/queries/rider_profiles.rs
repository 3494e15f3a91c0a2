// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rider profile aggregates: trip counts, earnings, rating.

use rusqlite::params;
use tuma_core::TumaError;

use crate::database::{map_tr_err, Database};
use crate::models::RiderProfile;

fn profile_from_row(row: &rusqlite::Row<'_>) -> Result<RiderProfile, rusqlite::Error> {
    Ok(RiderProfile {
        user_id: row.get(0)?,
        total_trips: row.get(1)?,
        total_earnings: row.get(2)?,
        rating: row.get(3)?,
        rating_count: row.get(4)?,
    })
}

/// Create an empty profile for a newly verified rider.
pub async fn create_profile(db: &Database, user_id: &str) -> Result<(), TumaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO rider_profiles (user_id, total_trips, total_earnings, rating, rating_count)
                 VALUES (?1, 0, 0, 0, 0)",
                params![user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a rider's profile.
pub async fn get_profile(db: &Database, user_id: &str) -> Result<Option<RiderProfile>, TumaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, total_trips, total_earnings, rating, rating_count
                 FROM rider_profiles WHERE user_id = ?1",
            )?;
            let result = stmt.query_row(params![user_id], profile_from_row);
            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Record a completed delivery: bump the trip counter and credit earnings.
pub async fn record_delivery(
    db: &Database,
    user_id: &str,
    earnings: f64,
) -> Result<(), TumaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE rider_profiles
                 SET total_trips = total_trips + 1,
                     total_earnings = total_earnings + ?1
                 WHERE user_id = ?2",
                params![earnings, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a rider's rating aggregate.
pub async fn update_rating(
    db: &Database,
    user_id: &str,
    rating: f64,
    rating_count: i64,
) -> Result<(), TumaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE rider_profiles SET rating = ?1, rating_count = ?2 WHERE user_id = ?3",
                params![rating, rating_count, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
