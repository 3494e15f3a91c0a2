// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rider-facing account queries.

use std::sync::Arc;

use tuma_core::{RiderProfile, TumaError, User, UserRole};
use tuma_storage::queries::rider_profiles;
use tuma_storage::Database;

/// Read side of rider accounts.
pub struct RiderAccounts {
    db: Arc<Database>,
}

impl RiderAccounts {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch a rider's earnings summary. Riders only.
    pub async fn earnings_summary(&self, user: &User) -> Result<RiderProfile, TumaError> {
        if user.role != UserRole::Rider {
            return Err(TumaError::validation(
                "earnings summaries are for riders only",
            ));
        }
        rider_profiles::get_profile(&self.db, &user.id)
            .await?
            .ok_or_else(|| TumaError::not_found("rider profile"))
    }
}
