// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue report persistence.

use rusqlite::params;
use tuma_core::TumaError;

use crate::database::{map_tr_err, Database};
use crate::models::Report;

/// Insert a report.
pub async fn create_report(db: &Database, report: &Report) -> Result<(), TumaError> {
    let report = report.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reports (id, trip_id, reporter_id, reason, description, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    report.id,
                    report.trip_id,
                    report.reporter_id,
                    report.reason,
                    report.description,
                    report.status,
                    report.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List reports filed against a trip, newest first.
pub async fn list_reports_for_trip(db: &Database, trip_id: &str) -> Result<Vec<Report>, TumaError> {
    let trip_id = trip_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, trip_id, reporter_id, reason, description, status, created_at
                 FROM reports WHERE trip_id = ?1 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![trip_id], |row| {
                Ok(Report {
                    id: row.get(0)?,
                    trip_id: row.get(1)?,
                    reporter_id: row.get(2)?,
                    reason: row.get(3)?,
                    description: row.get(4)?,
                    status: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut reports = Vec::new();
            for row in rows {
                reports.push(row?);
            }
            Ok(reports)
        })
        .await
        .map_err(map_tr_err)
}
