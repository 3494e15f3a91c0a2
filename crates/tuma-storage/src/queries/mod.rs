// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod ratings;
pub mod reports;
pub mod rider_profiles;
pub mod trips;
pub mod users;

/// Map a stored enum column back to its typed form.
///
/// Conversion failures surface as rusqlite conversion errors so they flow
/// through the normal query error path.
pub(crate) fn parse_column<T: std::str::FromStr>(
    idx: usize,
    raw: String,
) -> Result<T, rusqlite::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().map_err(|e: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
