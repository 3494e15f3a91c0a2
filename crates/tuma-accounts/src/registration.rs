// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration and OTP verification.
//!
//! A registration creates an unverified user row with a numeric OTP and
//! its expiry stamped on it, then sends the code over chat. Verification
//! checks the code and expiry, flips the verified flag, clears the OTP,
//! and provisions a rider profile when the new user is a rider.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tuma_core::types::now_rfc3339;
use tuma_core::{mask_phone, normalize_phone, ChatSender, TumaError, User, UserRole};
use tuma_config::model::AuthConfig;
use tuma_storage::queries::{rider_profiles, users};
use tuma_storage::Database;

/// Creates accounts and walks them through OTP verification.
pub struct RegistrationService {
    db: Arc<Database>,
    config: AuthConfig,
    sender: Arc<dyn ChatSender>,
}

impl RegistrationService {
    pub fn new(db: Arc<Database>, config: AuthConfig, sender: Arc<dyn ChatSender>) -> Self {
        Self { db, config, sender }
    }

    /// Look up a user by phone, normalizing first.
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, TumaError> {
        users::get_user_by_phone(&self.db, &normalize_phone(phone)).await
    }

    /// Create an unverified account and send its OTP over chat.
    pub async fn begin(
        &self,
        phone: &str,
        full_name: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, TumaError> {
        if !email.contains('@') {
            return Err(TumaError::validation("that does not look like an email"));
        }
        let phone = normalize_phone(phone);
        if users::get_user_by_phone(&self.db, &phone).await?.is_some() {
            return Err(TumaError::validation(
                "this phone number is already registered",
            ));
        }
        if users::get_user_by_email(&self.db, email).await?.is_some() {
            return Err(TumaError::validation("this email is already registered"));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.clone(),
            role,
            otp: None,
            otp_expires_at: None,
            verified: false,
            rating: 0.0,
            rating_count: 0,
            created_at: now_rfc3339(),
        };
        users::create_user(&self.db, &user).await?;
        self.issue_otp(&user).await?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone(&phone),
            role = %role,
            "registration started"
        );
        Ok(user)
    }

    /// Generate a fresh OTP for an unverified user and send it.
    pub async fn issue_otp(&self, user: &User) -> Result<(), TumaError> {
        let otp = generate_otp(self.config.otp_length);
        let expires_at =
            (Utc::now() + Duration::minutes(self.config.otp_ttl_minutes as i64)).to_rfc3339();
        users::set_otp(&self.db, &user.id, &otp, &expires_at).await?;

        self.sender
            .send_text(
                &user.phone,
                &format!("Your Tuma verification code is {otp}. It expires in {} minutes.",
                    self.config.otp_ttl_minutes),
            )
            .await;
        Ok(())
    }

    /// Verify a pending OTP. On success the user is marked verified, the
    /// OTP is cleared, and riders get an empty profile.
    pub async fn verify_otp(&self, phone: &str, code: &str) -> Result<User, TumaError> {
        let phone = normalize_phone(phone);
        let user = users::get_user_by_phone(&self.db, &phone)
            .await?
            .ok_or_else(|| TumaError::not_found("account"))?;

        if user.verified {
            return Err(TumaError::validation("this account is already verified"));
        }

        let (Some(otp), Some(expires_at)) = (&user.otp, &user.otp_expires_at) else {
            return Err(TumaError::validation("no verification code is pending"));
        };
        if otp != code {
            return Err(TumaError::validation("that code does not match"));
        }
        if is_past(expires_at) {
            return Err(TumaError::validation(
                "that code has expired, send 'register' to start again",
            ));
        }

        users::mark_verified(&self.db, &user.id).await?;
        if user.role == UserRole::Rider {
            rider_profiles::create_profile(&self.db, &user.id).await?;
        }

        tracing::info!(user_id = %user.id, phone = %mask_phone(&phone), "account verified");
        users::get_user(&self.db, &user.id)
            .await?
            .ok_or_else(|| TumaError::not_found("account"))
    }
}

fn generate_otp(length: u32) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

fn is_past(rfc3339: &str) -> bool {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(ts) => ts < Utc::now(),
        // An unparseable expiry counts as expired.
        Err(_) => true,
    }
}
