// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::cell::RefCell;

use slotbook_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::auth::AuthenticatedActor;
use crate::handlers;
use crate::notify::{Notifier, NotifyError};
use crate::request_response::{
    CreateEventRequest, CreateSlotRequest, SignupOutcome, SignupRequest,
};

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-08-28 10:00 UTC)
}

pub fn event_start() -> OffsetDateTime {
    datetime!(2026-09-01 09:00 UTC)
}

/// Creates a participant account directly (no bcrypt cost) and returns
/// its actor.
pub fn create_test_actor(persistence: &mut Persistence, email: &str) -> AuthenticatedActor {
    let participant_id = persistence
        .create_participant(email, "test-hash", None)
        .expect("participant created");
    AuthenticatedActor::new(participant_id, email.to_lowercase())
}

pub fn event_request(slug: &str) -> CreateEventRequest {
    CreateEventRequest {
        title: format!("Event {slug}"),
        description: None,
        slug: slug.to_string(),
        starts_at: event_start(),
        ends_at: None,
        timezone: String::from("UTC"),
        show_contact: true,
        allow_swap: true,
        allow_waitlist: true,
        max_signups_per_participant: 1,
        notify_email: None,
    }
}

pub fn create_test_event(
    persistence: &mut Persistence,
    owner: &AuthenticatedActor,
    slug: &str,
) -> i64 {
    handlers::create_event(persistence, owner, event_request(slug), now())
        .expect("event created")
}

pub fn create_test_slot(
    persistence: &mut Persistence,
    owner: &AuthenticatedActor,
    event_id: i64,
    offset_minutes: i64,
) -> i64 {
    let starts_at = event_start() + Duration::minutes(offset_minutes);
    handlers::create_slot(
        persistence,
        owner,
        CreateSlotRequest {
            event_id,
            starts_at,
            ends_at: starts_at + Duration::minutes(30),
            label: None,
        },
        now(),
    )
    .expect("slot created")
}

pub fn signup_request(event_slug: &str, slot_id: i64, email: &str) -> SignupRequest {
    SignupRequest {
        event_slug: event_slug.to_string(),
        slot_id,
        email: email.to_string(),
        name: None,
        phone: None,
        team_name: None,
        join_waitlist: false,
        user_id: None,
    }
}

/// Runs the full two-step signup and returns the confirmed booking ID.
pub fn book_slot(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    event_slug: &str,
    slot_id: i64,
    email: &str,
) -> i64 {
    let requested = handlers::request_signup(
        persistence,
        notifier,
        signup_request(event_slug, slot_id, email),
        now(),
    )
    .expect("signup requested");
    match handlers::complete_signup(persistence, notifier, &requested.token, now())
        .expect("signup completed")
    {
        SignupOutcome::Booked { booking_id } => booking_id,
        SignupOutcome::Waitlisted { .. } => panic!("expected a booking"),
    }
}

/// A notifier that records every message for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub emails: RefCell<Vec<(String, String)>>,
    pub sms: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn send_email(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotifyError> {
        self.emails
            .borrow_mut()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }

    fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        self.sms
            .borrow_mut()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

impl RecordingNotifier {
    pub fn email_count(&self) -> usize {
        self.emails.borrow().len()
    }

    pub fn email_subjects_for(&self, to: &str) -> Vec<String> {
        self.emails
            .borrow()
            .iter()
            .filter(|(recipient, _)| recipient == to)
            .map(|(_, subject)| subject.clone())
            .collect()
    }
}

/// A notifier whose every delivery fails.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError {
            message: String::from("smtp unreachable"),
        })
    }

    fn send_sms(&self, _to: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError {
            message: String::from("sms gateway unreachable"),
        })
    }
}
