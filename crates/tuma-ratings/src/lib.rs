// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-trip rating aggregation.
//!
//! A participant of a delivered trip may rate the counterpart once. The
//! target's running average is recomputed incrementally and rounded to two
//! decimals; rider averages are mirrored onto the rider profile.

use std::sync::Arc;

use tuma_core::types::now_rfc3339;
use tuma_core::{round2, Rating, TripStatus, TumaError, User, UserRole};
use tuma_storage::queries::{ratings, rider_profiles, trips, users};
use tuma_storage::Database;

/// Validates and records ratings, maintaining per-user averages.
pub struct RatingAggregator {
    db: Arc<Database>,
}

impl RatingAggregator {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record a rating of `value` (1 to 5) from `reviewer` against the
    /// counterpart on a delivered trip.
    ///
    /// Preconditions are checked in order: trip exists, trip is delivered,
    /// reviewer participated, reviewer has not already rated, target
    /// exists, target is the reviewer's counterpart.
    pub async fn rate(
        &self,
        trip_id: &str,
        reviewer: &User,
        value: u8,
        comment: Option<&str>,
    ) -> Result<Rating, TumaError> {
        if !(1..=5).contains(&value) {
            return Err(TumaError::validation("ratings run from 1 to 5"));
        }

        let trip = trips::get_trip(&self.db, trip_id)
            .await?
            .ok_or_else(|| TumaError::not_found("trip"))?;
        if trip.status != TripStatus::Delivered {
            return Err(TumaError::validation(
                "you can only rate a delivered trip",
            ));
        }

        let is_customer = trip.customer_id == reviewer.id;
        let is_rider = trip.rider_id.as_deref() == Some(reviewer.id.as_str());
        if !is_customer && !is_rider {
            return Err(TumaError::validation(
                "only trip participants can leave a rating",
            ));
        }

        if ratings::rating_exists(&self.db, trip_id, &reviewer.id).await? {
            return Err(TumaError::validation(
                "you have already rated this trip",
            ));
        }

        let target_id = if is_customer {
            trip.rider_id
                .clone()
                .ok_or_else(|| TumaError::validation("this trip has no rider to rate"))?
        } else {
            trip.customer_id.clone()
        };
        let target = users::get_user(&self.db, &target_id)
            .await?
            .ok_or_else(|| TumaError::not_found("user"))?;

        let rating = Rating {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: trip.id.clone(),
            reviewer_id: reviewer.id.clone(),
            target_id: target.id.clone(),
            value: i64::from(value),
            comment: comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            created_at: now_rfc3339(),
        };
        ratings::create_rating(&self.db, &rating).await?;

        let new_count = target.rating_count + 1;
        let new_avg = round2(
            (target.rating * target.rating_count as f64 + f64::from(value)) / new_count as f64,
        );
        users::update_rating(&self.db, &target.id, new_avg, new_count).await?;
        if target.role == UserRole::Rider {
            rider_profiles::update_rating(&self.db, &target.id, new_avg, new_count).await?;
        }

        tracing::info!(trip_id = %trip.id, target_id = %target.id, value, new_avg, "rating recorded");
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tuma_core::types::Trip;

    async fn setup() -> (Arc<Database>, RatingAggregator, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());

        for (id, phone, role) in [
            ("cust-1", "+254700000070", UserRole::Customer),
            ("cust-2", "+254700000071", UserRole::Customer),
            ("rider-1", "+254700000072", UserRole::Rider),
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
        rider_profiles::create_profile(&db, "rider-1").await.unwrap();

        seed_trip(&db, "t-delivered", TripStatus::Delivered).await;
        seed_trip(&db, "t-open", TripStatus::InTransit).await;

        let aggregator = RatingAggregator::new(db.clone());
        (db, aggregator, dir)
    }

    async fn seed_trip(db: &Database, id: &str, status: TripStatus) {
        let trip = Trip {
            id: id.to_string(),
            customer_id: "cust-1".to_string(),
            rider_id: Some("rider-1".to_string()),
            pickup: "A".to_string(),
            dropoff: "B".to_string(),
            distance_km: 3.0,
            fare: 345.0,
            status,
            accepted_at: Some(now_rfc3339()),
            completed_at: (status == TripStatus::Delivered).then(now_rfc3339),
            cancelled_at: None,
            created_at: now_rfc3339(),
        };
        trips::create_trip(db, &trip).await.unwrap();
    }

    async fn user(db: &Database, id: &str) -> User {
        users::get_user(db, id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn customer_rates_rider_and_average_updates() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let rating = aggregator
            .rate("t-delivered", &customer, 4, Some("smooth delivery"))
            .await
            .unwrap();
        assert_eq!(rating.target_id, "rider-1");
        assert_eq!(rating.value, 4);

        let rider = user(&db, "rider-1").await;
        assert_eq!(rider.rating, 4.0);
        assert_eq!(rider.rating_count, 1);

        // Mirrored onto the profile.
        let profile = rider_profiles::get_profile(&db, "rider-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.rating, 4.0);
        assert_eq!(profile.rating_count, 1);
    }

    #[tokio::test]
    async fn average_is_incremental_and_rounded() {
        let (db, aggregator, _dir) = setup().await;

        // Pretend the rider already holds a 5.0 average over two ratings.
        users::update_rating(&db, "rider-1", 5.0, 2).await.unwrap();

        let customer = user(&db, "cust-1").await;
        aggregator.rate("t-delivered", &customer, 3, None).await.unwrap();

        let rider = user(&db, "rider-1").await;
        // (5*2 + 3) / 3 = 4.333... -> 4.33
        assert_eq!(rider.rating, 4.33);
        assert_eq!(rider.rating_count, 3);
    }

    #[tokio::test]
    async fn rider_rates_customer_without_profile_mirror() {
        let (db, aggregator, _dir) = setup().await;
        let rider = user(&db, "rider-1").await;

        let rating = aggregator.rate("t-delivered", &rider, 5, None).await.unwrap();
        assert_eq!(rating.target_id, "cust-1");

        let customer = user(&db, "cust-1").await;
        assert_eq!(customer.rating, 5.0);
        assert_eq!(customer.rating_count, 1);
    }

    #[tokio::test]
    async fn undelivered_trip_cannot_be_rated() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let err = aggregator.rate("t-open", &customer, 5, None).await.unwrap_err();
        assert!(matches!(err, TumaError::Validation(_)));
    }

    #[tokio::test]
    async fn non_participant_cannot_rate() {
        let (db, aggregator, _dir) = setup().await;
        let stranger = user(&db, "cust-2").await;

        let err = aggregator
            .rate("t-delivered", &stranger, 5, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TumaError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_rating_is_rejected() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        aggregator.rate("t-delivered", &customer, 4, None).await.unwrap();
        let err = aggregator.rate("t-delivered", &customer, 5, None).await.unwrap_err();
        assert!(matches!(err, TumaError::Validation(_)));

        // The counterpart may still rate.
        let rider = user(&db, "rider-1").await;
        aggregator.rate("t-delivered", &rider, 5, None).await.unwrap();
    }

    #[tokio::test]
    async fn out_of_range_value_is_rejected() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        for value in [0, 6] {
            let err = aggregator
                .rate("t-delivered", &customer, value, None)
                .await
                .unwrap_err();
            assert!(matches!(err, TumaError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn blank_comment_is_stored_as_none() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let rating = aggregator
            .rate("t-delivered", &customer, 4, Some("   "))
            .await
            .unwrap();
        assert!(rating.comment.is_none());
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let (db, aggregator, _dir) = setup().await;
        let customer = user(&db, "cust-1").await;

        let err = aggregator.rate("missing", &customer, 4, None).await.unwrap_err();
        assert!(matches!(err, TumaError::NotFound(_)));
    }
}
