// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingNotifier, book_slot, create_test_actor, create_test_event, create_test_slot, now,
    signup_request, test_persistence,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::SignupOutcome;

#[test]
fn two_step_signup_books_a_free_slot() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "open");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);

    let requested = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("open", slot_id, "Signer@Example.com"),
        now(),
    )
    .expect("request succeeds");
    // The confirmation email went out before any booking exists.
    assert_eq!(notifier.email_subjects_for("Signer@Example.com").len(), 1);

    let outcome = handlers::complete_signup(&mut persistence, &notifier, &requested.token, now())
        .expect("completion succeeds");
    let SignupOutcome::Booked { booking_id } = outcome else {
        panic!("expected a booking, got {outcome:?}");
    };

    let detail = handlers::event_detail(&mut persistence, "open").expect("detail succeeds");
    let view = detail.slots[0].booking.as_ref().expect("slot is held");
    assert_eq!(view.booking_id, booking_id);
    assert_eq!(
        view.contact.as_ref().expect("contacts shown").email,
        "signer@example.com"
    );
}

#[test]
fn contact_details_are_withheld_when_the_event_hides_them() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let mut request = super::helpers::event_request("private");
    request.show_contact = false;
    let event_id = handlers::create_event(&mut persistence, &owner, request, now())
        .expect("event created");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);
    book_slot(&mut persistence, &notifier, "private", slot_id, "quiet@example.com");

    let detail = handlers::event_detail(&mut persistence, "private").expect("detail succeeds");
    let view = detail.slots[0].booking.as_ref().expect("slot is held");
    assert!(view.contact.is_none());
}

#[test]
fn tokens_are_single_use() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "once");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);

    let requested = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("once", slot_id, "a@example.com"),
        now(),
    )
    .expect("request succeeds");
    handlers::complete_signup(&mut persistence, &notifier, &requested.token, now())
        .expect("first completion succeeds");

    let err = handlers::complete_signup(&mut persistence, &notifier, &requested.token, now())
        .expect_err("second completion must fail");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn full_slot_without_waitlist_opt_in_conflicts_up_front() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "full");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);
    book_slot(&mut persistence, &notifier, "full", slot_id, "first@example.com");

    let err = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("full", slot_id, "second@example.com"),
        now(),
    )
    .expect_err("request must fail");
    assert!(
        matches!(err, ApiError::Conflict { ref rule, .. } if rule == "one_confirmed_booking_per_slot")
    );
}

#[test]
fn full_slot_with_opt_in_joins_the_waitlist() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "queue");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);
    book_slot(&mut persistence, &notifier, "queue", slot_id, "first@example.com");

    let mut request = signup_request("queue", slot_id, "second@example.com");
    request.join_waitlist = true;
    let requested = handlers::request_signup(&mut persistence, &notifier, request, now())
        .expect("request succeeds");

    let outcome = handlers::complete_signup(&mut persistence, &notifier, &requested.token, now())
        .expect("completion succeeds");
    assert!(matches!(
        outcome,
        SignupOutcome::Waitlisted { position: 1, .. }
    ));

    let detail = handlers::event_detail(&mut persistence, "queue").expect("detail succeeds");
    assert_eq!(detail.slots[0].waitlist_count, 1);
}

#[test]
fn per_participant_signup_limit_is_enforced() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "limited");
    let first_slot = create_test_slot(&mut persistence, &owner, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, &owner, event_id, 30);
    book_slot(&mut persistence, &notifier, "limited", first_slot, "greedy@example.com");

    // The limit is per event and case-insensitive on email.
    let err = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("limited", second_slot, "GREEDY@example.com"),
        now(),
    )
    .expect_err("request must fail");
    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "signup_limit"));
}

#[test]
fn completion_loses_cleanly_when_the_slot_fills_in_between() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "raced");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);

    let requested = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("raced", slot_id, "slow@example.com"),
        now(),
    )
    .expect("request succeeds");

    // Someone else books the slot before the first signer confirms.
    book_slot(&mut persistence, &notifier, "raced", slot_id, "fast@example.com");

    let err = handlers::complete_signup(&mut persistence, &notifier, &requested.token, now())
        .expect_err("completion must fail");
    assert!(
        matches!(err, ApiError::Conflict { ref rule, .. } if rule == "one_confirmed_booking_per_slot")
    );
}

#[test]
fn unknown_event_or_slot_is_not_found() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "exists");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);

    let err = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("missing", slot_id, "a@example.com"),
        now(),
    )
    .expect_err("request must fail");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    let err = handlers::request_signup(
        &mut persistence,
        &notifier,
        signup_request("exists", 9999, "a@example.com"),
        now(),
    )
    .expect_err("request must fail");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
