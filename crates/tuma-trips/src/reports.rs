// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue reports filed against trips over chat.

use std::sync::Arc;

use tuma_core::types::now_rfc3339;
use tuma_core::{Report, TumaError, User, UserRole};
use tuma_storage::queries::{reports, trips};
use tuma_storage::Database;

/// Reason recorded for reports filed through the chat channel.
pub const CHAT_REPORT_REASON: &str = "WHATSAPP_REPORT";

/// Files issue reports, visible to trip participants only.
pub struct ReportDesk {
    db: Arc<Database>,
}

impl ReportDesk {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// File an issue report against a trip. The reporter must be the
    /// trip's customer, its assigned rider, or an admin.
    pub async fn file(
        &self,
        trip_id: &str,
        reporter: &User,
        description: &str,
    ) -> Result<Report, TumaError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TumaError::validation("a report needs a description"));
        }

        let trip = trips::get_trip(&self.db, trip_id)
            .await?
            .ok_or_else(|| TumaError::not_found("trip"))?;

        let participant = trip.customer_id == reporter.id
            || trip.rider_id.as_deref() == Some(reporter.id.as_str())
            || reporter.role == UserRole::Admin;
        if !participant {
            return Err(TumaError::not_found("trip"));
        }

        let report = Report {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: trip.id.clone(),
            reporter_id: reporter.id.clone(),
            reason: CHAT_REPORT_REASON.to_string(),
            description: description.to_string(),
            status: "OPEN".to_string(),
            created_at: now_rfc3339(),
        };
        reports::create_report(&self.db, &report).await?;

        tracing::info!(trip_id = %trip.id, report_id = %report.id, "issue report filed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tuma_core::types::{Trip, TripStatus};
    use tuma_storage::queries::users;

    async fn setup() -> (Arc<Database>, ReportDesk, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());

        for (id, phone, role) in [
            ("cust-1", "+254700000060", UserRole::Customer),
            ("cust-2", "+254700000061", UserRole::Customer),
        ] {
            let user = User {
                id: id.to_string(),
                full_name: id.to_string(),
                email: format!("{id}@example.com"),
                phone: phone.to_string(),
                role,
                otp: None,
                otp_expires_at: None,
                verified: true,
                rating: 0.0,
                rating_count: 0,
                created_at: now_rfc3339(),
            };
            users::create_user(&db, &user).await.unwrap();
        }

        let trip = Trip {
            id: "t1".to_string(),
            customer_id: "cust-1".to_string(),
            rider_id: None,
            pickup: "A".to_string(),
            dropoff: "B".to_string(),
            distance_km: 3.0,
            fare: 345.0,
            status: TripStatus::Requested,
            accepted_at: None,
            completed_at: None,
            cancelled_at: None,
            created_at: now_rfc3339(),
        };
        trips::create_trip(&db, &trip).await.unwrap();

        let desk = ReportDesk::new(db.clone());
        (db, desk, dir)
    }

    async fn user(db: &Database, id: &str) -> User {
        users::get_user(db, id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn participant_files_open_report() {
        let (db, desk, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let report = desk.file("t1", &customer, "  rider never showed  ").await.unwrap();
        assert_eq!(report.reason, CHAT_REPORT_REASON);
        assert_eq!(report.status, "OPEN");
        assert_eq!(report.description, "rider never showed");

        let listed = reports::list_reports_for_trip(&db, "t1").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn non_participant_cannot_file() {
        let (db, desk, _dir) = setup().await;
        let stranger = user(&db, "cust-2").await;

        let err = desk.file("t1", &stranger, "nope").await.unwrap_err();
        assert!(matches!(err, TumaError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_description_is_rejected() {
        let (db, desk, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let err = desk.file("t1", &customer, "   ").await.unwrap_err();
        assert!(matches!(err, TumaError::Validation(_)));
    }
}
