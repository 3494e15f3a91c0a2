// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation scenarios against a real temp database.

use std::sync::Arc;

use tempfile::tempdir;
use tuma_config::model::TumaConfig;
use tuma_core::types::{now_rfc3339, User};
use tuma_core::UserRole;
use tuma_engine::Engine;
use tuma_storage::queries::{rider_profiles, trips, users};
use tuma_storage::Database;
use tuma_test_utils::RecordingSender;

const CUSTOMER_PHONE: &str = "254711000001";
const RIDER_PHONE: &str = "254711000002";

async fn setup() -> (Engine, Arc<Database>, Arc<RecordingSender>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());
    let sender = Arc::new(RecordingSender::new());
    let config = TumaConfig::default();
    let engine = Engine::new(db.clone(), &config, sender.clone());
    (engine, db, sender, dir)
}

async fn seed_verified(db: &Database, id: &str, phone: &str, role: UserRole) {
    let user = User {
        id: id.to_string(),
        full_name: id.to_string(),
        email: format!("{id}@example.com"),
        phone: format!("+{phone}"),
        role,
        otp: None,
        otp_expires_at: None,
        verified: true,
        rating: 0.0,
        rating_count: 0,
        created_at: now_rfc3339(),
    };
    users::create_user(db, &user).await.unwrap();
    if role == UserRole::Rider {
        rider_profiles::create_profile(db, id).await.unwrap();
    }
}

fn trip_id_from(reply: &str) -> String {
    reply
        .split("Trip id: ")
        .nth(1)
        .and_then(|rest| rest.split('.').next())
        .expect("booking reply carries a trip id")
        .to_string()
}

#[tokio::test]
async fn registration_walks_email_name_role_and_otp() {
    let (engine, db, sender, _dir) = setup().await;

    engine.handle_inbound(CUSTOMER_PHONE, "register").await;
    assert!(sender.last_body().unwrap().contains("email"));

    engine.handle_inbound(CUSTOMER_PHONE, "not an email").await;
    assert!(sender.last_body().unwrap().contains("doesn't look like an email"));

    engine.handle_inbound(CUSTOMER_PHONE, "alice@example.com").await;
    assert!(sender.last_body().unwrap().contains("full name"));

    engine.handle_inbound(CUSTOMER_PHONE, "Alice").await;
    assert!(sender.last_body().unwrap().contains("customer or a rider"));

    engine.handle_inbound(CUSTOMER_PHONE, "customer").await;
    assert!(sender.last_body().unwrap().contains("otp <code>"));

    // The OTP lands on the user row; read it back like the operator would.
    let user = users::get_user_by_phone(&db, "+254711000001")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.verified);
    let otp = user.otp.clone().unwrap();

    // Wrong code keeps the stage with a retry prompt.
    engine.handle_inbound(CUSTOMER_PHONE, "otp 000000").await;
    assert!(sender.last_body().unwrap().contains("Try again"));

    // Stage containment: an unrelated command mid-OTP creates no trip and
    // does not leave the stage.
    engine.handle_inbound(CUSTOMER_PHONE, "ride from A to B").await;
    assert!(sender.last_body().unwrap().contains("otp <code>"));

    engine
        .handle_inbound(CUSTOMER_PHONE, &format!("otp {otp}"))
        .await;
    assert!(sender.last_body().unwrap().contains("verified"));

    let user = users::get_user_by_phone(&db, "+254711000001")
        .await
        .unwrap()
        .unwrap();
    assert!(user.verified);
    assert!(user.otp.is_none());
}

#[tokio::test]
async fn lapsed_registration_window_resets_to_idle() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());
    let sender = Arc::new(RecordingSender::new());
    let mut config = TumaConfig::default();
    // A zero-minute window makes the registration credential lapse before
    // any code can arrive.
    config.auth.credential_ttl_minutes = 0;
    let engine = Engine::new(db.clone(), &config, sender.clone());

    engine.handle_inbound(CUSTOMER_PHONE, "register").await;
    engine.handle_inbound(CUSTOMER_PHONE, "alice@example.com").await;
    engine.handle_inbound(CUSTOMER_PHONE, "Alice").await;
    engine.handle_inbound(CUSTOMER_PHONE, "customer").await;
    assert!(sender.last_body().unwrap().contains("otp <code>"));

    engine.handle_inbound(CUSTOMER_PHONE, "otp 123456").await;
    assert!(sender
        .last_body()
        .unwrap()
        .contains("registration session has expired"));

    // Back at Idle: a fresh code is refused outright instead of
    // re-prompting for the lapsed flow.
    engine.handle_inbound(CUSTOMER_PHONE, "otp 123456").await;
    assert!(sender.last_body().unwrap().contains("No verification is pending"));
}

#[tokio::test]
async fn registering_twice_is_refused() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;

    engine.handle_inbound(CUSTOMER_PHONE, "register").await;
    assert!(sender.last_body().unwrap().contains("already registered"));
}

#[tokio::test]
async fn booking_flow_quotes_then_creates_on_confirm() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;

    engine
        .handle_inbound(CUSTOMER_PHONE, "ride from Lavington to Westlands")
        .await;
    let quote = sender.last_body().unwrap();
    assert!(quote.contains("estimated fare KES"));
    assert!(quote.contains("'confirm'"));

    // Off-grammar input while awaiting confirmation re-prompts.
    engine.handle_inbound(CUSTOMER_PHONE, "hmm let me think").await;
    assert!(sender.last_body().unwrap().contains("Still waiting"));

    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    let booked = sender.last_body().unwrap();
    assert!(booked.contains("booked"));

    let trip_id = trip_id_from(&booked);
    let trip = trips::get_trip(&db, &trip_id).await.unwrap().unwrap();
    assert_eq!(trip.pickup, "Lavington");
    assert_eq!(trip.dropoff, "Westlands");
}

#[tokio::test]
async fn cancel_discards_the_pending_quote() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;

    engine.handle_inbound(CUSTOMER_PHONE, "ride from A to B").await;
    engine.handle_inbound(CUSTOMER_PHONE, "cancel").await;
    assert!(sender.last_body().unwrap().contains("discarded"));

    // Confirm afterwards finds nothing pending.
    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    assert!(sender.last_body().unwrap().contains("nothing waiting"));
}

#[tokio::test]
async fn full_delivery_and_rating_over_chat() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;
    seed_verified(&db, "bob", RIDER_PHONE, UserRole::Rider).await;

    engine
        .handle_inbound(CUSTOMER_PHONE, "ride from Kilimani to CBD")
        .await;
    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    let trip_id = trip_id_from(&sender.last_body().unwrap());

    engine
        .handle_inbound(RIDER_PHONE, &format!("accept {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("accepted"));

    engine
        .handle_inbound(RIDER_PHONE, &format!("picked up {trip_id}"))
        .await;
    engine
        .handle_inbound(RIDER_PHONE, &format!("in transit {trip_id}"))
        .await;

    engine
        .handle_inbound(CUSTOMER_PHONE, &format!("track {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("in transit"));

    engine
        .handle_inbound(RIDER_PHONE, &format!("delivered {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("delivered"));

    engine
        .handle_inbound(CUSTOMER_PHONE, &format!("rate {trip_id} 5 great service"))
        .await;
    assert!(sender.last_body().unwrap().contains("Thanks for the feedback"));

    // Rating landed on the rider.
    let rider = users::get_user(&db, "bob").await.unwrap().unwrap();
    assert_eq!(rider.rating, 5.0);

    // Earnings summary reflects the delivery.
    engine.handle_inbound(RIDER_PHONE, "earnings").await;
    let summary = sender.last_body().unwrap();
    assert!(summary.contains("1 trips"));
}

#[tokio::test]
async fn rider_cannot_book_and_customer_cannot_accept() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;
    seed_verified(&db, "bob", RIDER_PHONE, UserRole::Rider).await;

    engine.handle_inbound(RIDER_PHONE, "ride from A to B").await;
    assert!(sender.last_body().unwrap().contains("only customers"));

    engine.handle_inbound(CUSTOMER_PHONE, "ride from A to B").await;
    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    let trip_id = trip_id_from(&sender.last_body().unwrap());

    engine
        .handle_inbound(CUSTOMER_PHONE, &format!("accept {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("only riders"));
}

#[tokio::test]
async fn reject_only_acknowledges() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;
    seed_verified(&db, "bob", RIDER_PHONE, UserRole::Rider).await;

    engine.handle_inbound(CUSTOMER_PHONE, "ride from A to B").await;
    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    let trip_id = trip_id_from(&sender.last_body().unwrap());

    engine
        .handle_inbound(RIDER_PHONE, &format!("reject {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("another rider"));

    // The trip is untouched and still up for grabs.
    engine
        .handle_inbound(RIDER_PHONE, &format!("accept {trip_id}"))
        .await;
    assert!(sender.last_body().unwrap().contains("accepted"));
}

#[tokio::test]
async fn report_issue_notifies_the_configured_admin() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());
    let sender = Arc::new(RecordingSender::new());
    let mut config = TumaConfig::default();
    config.whatsapp.admin_phone = Some("+254799999999".to_string());
    let engine = Engine::new(db.clone(), &config, sender.clone());

    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;
    engine.handle_inbound(CUSTOMER_PHONE, "ride from A to B").await;
    engine.handle_inbound(CUSTOMER_PHONE, "confirm").await;
    let trip_id = trip_id_from(&sender.last_body().unwrap());

    engine
        .handle_inbound(
            CUSTOMER_PHONE,
            &format!("report issue {trip_id} package never arrived"),
        )
        .await;

    let sent = sender.sent();
    let admin_note = sent
        .iter()
        .find(|(to, _)| to == "+254799999999")
        .expect("admin was notified");
    assert!(admin_note.1.contains("package never arrived"));
    assert!(sender.last_body().unwrap().contains("has been filed"));
}

#[tokio::test]
async fn earnings_refused_for_customers() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;

    engine.handle_inbound(CUSTOMER_PHONE, "earnings").await;
    assert!(sender.last_body().unwrap().contains("riders only"));
}

#[tokio::test]
async fn failures_are_isolated_per_sender() {
    let (engine, db, sender, _dir) = setup().await;
    seed_verified(&db, "alice", CUSTOMER_PHONE, UserRole::Customer).await;

    // A failing turn for one sender.
    engine.handle_inbound(CUSTOMER_PHONE, "track ffffffff").await;
    assert!(sender.last_body().unwrap().contains("couldn't find"));

    // Another sender's flow is unaffected.
    engine.handle_inbound(RIDER_PHONE, "help").await;
    assert!(sender.last_body().unwrap().contains("ride from"));
}
