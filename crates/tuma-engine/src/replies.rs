// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned reply text and formatting helpers.

use tuma_core::{RiderProfile, Trip, TripStatus};

pub const DIDNT_UNDERSTAND: &str =
    "Sorry, I didn't understand that. Send 'help' for the list of commands.";

pub const ASK_EMAIL: &str = "Welcome to Tuma! What's your email address?";
pub const ASK_EMAIL_AGAIN: &str =
    "That doesn't look like an email address. Please send your email.";
pub const ASK_NAME: &str = "Thanks! What's your full name?";
pub const ASK_ROLE: &str = "Are you signing up as a customer or a rider?";
pub const ASK_ROLE_AGAIN: &str = "Please reply with either 'customer' or 'rider'.";
pub const ASK_OTP_AGAIN: &str =
    "Please send the verification code as 'otp <code>', or 'cancel' to stop.";
pub const REGISTRATION_EXPIRED: &str =
    "Your registration session has expired. Send 'register' to start again.";
pub const REGISTRATION_CANCELLED: &str =
    "Registration cancelled. Send 'register' whenever you're ready.";
pub const ALREADY_REGISTERED: &str =
    "This number is already registered. Send 'help' to see what you can do.";
pub const NOT_REGISTERED: &str =
    "You're not registered yet. Send 'register' to create an account.";
pub const NOT_VERIFIED: &str =
    "Please verify your account first with 'otp <code>'.";
pub const NO_PENDING_OTP: &str =
    "No verification is pending. Send 'register' to create an account.";
pub const NOTHING_TO_CONFIRM: &str = "There's nothing waiting for confirmation.";
pub const NOTHING_TO_CANCEL: &str = "There's nothing to cancel right now.";
pub const BOOKING_CANCELLED: &str = "No problem, the request has been discarded.";
pub const NOT_FOUND: &str =
    "I couldn't find that trip, or you don't have access to it.";
pub const INTERNAL_ERROR: &str =
    "Sorry, something went wrong on our side. Please try again.";

pub fn help_text() -> &'static str {
    "Here's what you can send me:\n\
     - register\n\
     - ride from <pickup> to <dropoff>\n\
     - confirm / cancel\n\
     - track <trip id>\n\
     - accept <trip id> / reject <trip id>\n\
     - picked up <trip id> / in transit <trip id> / delivered <trip id>\n\
     - rate <trip id> <1-5> [comment]\n\
     - report issue <trip id> <description>\n\
     - earnings"
}

pub fn status_phrase(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Requested => "waiting for a rider",
        TripStatus::Accepted => "accepted by a rider",
        TripStatus::PickedUp => "picked up",
        TripStatus::InTransit => "in transit",
        TripStatus::Delivered => "delivered",
        TripStatus::Cancelled => "cancelled",
    }
}

pub fn quote(pickup: &str, dropoff: &str, distance_km: f64, fare: f64) -> String {
    format!(
        "Delivery from {pickup} to {dropoff}: about {distance_km:.0} km, \
         estimated fare KES {fare:.2}. Reply 'confirm' to book or 'cancel'."
    )
}

pub fn trip_created(trip: &Trip) -> String {
    format!(
        "Your delivery is booked! Trip id: {}. Track it any time with 'track {}'.",
        trip.id, trip.id
    )
}

pub fn trip_status(trip: &Trip) -> String {
    format!(
        "Trip {} ({} to {}) is {}.",
        trip.id,
        trip.pickup,
        trip.dropoff,
        status_phrase(trip.status)
    )
}

pub fn trip_accepted(trip: &Trip) -> String {
    format!(
        "You've accepted trip {}. Pick up at {} and deliver to {}. \
         Send 'picked up {}' when you have the package.",
        trip.id, trip.pickup, trip.dropoff, trip.id
    )
}

pub fn trip_advanced(trip: &Trip) -> String {
    match trip.status {
        TripStatus::Delivered => format!(
            "Trip {} marked delivered. Great work! The customer can now rate you.",
            trip.id
        ),
        status => format!("Trip {} is now {}.", trip.id, status_phrase(status)),
    }
}

pub fn earnings(profile: &RiderProfile) -> String {
    format!(
        "You've completed {} trips for KES {:.2} total. Average rating: {:.2}.",
        profile.total_trips, profile.total_earnings, profile.rating
    )
}

pub fn report_filed(trip_id: &str) -> String {
    format!("Thanks, your report for trip {trip_id} has been filed. Our team will follow up.")
}
