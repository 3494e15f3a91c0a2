// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use rusqlite::params;
use tuma_core::TumaError;

use crate::database::{map_tr_err, Database};
use crate::models::User;
use crate::queries::parse_column;

const USER_COLUMNS: &str = "id, full_name, email, phone, role, otp, otp_expires_at, \
                            verified, rating, rating_count, created_at";

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        role: parse_column(4, row.get::<_, String>(4)?)?,
        otp: row.get(5)?,
        otp_expires_at: row.get(6)?,
        verified: row.get(7)?,
        rating: row.get(8)?,
        rating_count: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Insert a new user.
pub async fn create_user(db: &Database, user: &User) -> Result<(), TumaError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, full_name, email, phone, role, otp, otp_expires_at,
                                    verified, rating, rating_count, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    user.id,
                    user.full_name,
                    user.email,
                    user.phone,
                    user.role.to_string(),
                    user.otp,
                    user.otp_expires_at,
                    user.verified,
                    user.rating,
                    user.rating_count,
                    user.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: &str) -> Result<Option<User>, TumaError> {
    fetch_one(db, "id", id).await
}

/// Get a user by normalized phone number.
pub async fn get_user_by_phone(db: &Database, phone: &str) -> Result<Option<User>, TumaError> {
    fetch_one(db, "phone", phone).await
}

/// Get a user by email.
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, TumaError> {
    fetch_one(db, "email", email).await
}

async fn fetch_one(db: &Database, column: &str, value: &str) -> Result<Option<User>, TumaError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1");
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let result = stmt.query_row(params![value], user_from_row);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Store a pending OTP and its expiry on a user row.
pub async fn set_otp(
    db: &Database,
    user_id: &str,
    otp: &str,
    expires_at: &str,
) -> Result<(), TumaError> {
    let user_id = user_id.to_string();
    let otp = otp.to_string();
    let expires_at = expires_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users SET otp = ?1, otp_expires_at = ?2 WHERE id = ?3",
                params![otp, expires_at, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Mark a user verified and clear any pending OTP.
pub async fn mark_verified(db: &Database, user_id: &str) -> Result<(), TumaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users SET verified = 1, otp = NULL, otp_expires_at = NULL WHERE id = ?1",
                params![user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a user's rating aggregate.
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
                "UPDATE users SET rating = ?1, rating_count = ?2 WHERE id = ?3",
                params![rating, rating_count, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
