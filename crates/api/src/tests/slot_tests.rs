// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingNotifier, book_slot, create_test_actor, create_test_event, create_test_slot,
    event_start, now, test_persistence,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{CreateSlotRequest, GenerateSlotsRequest};
use time::Duration;

#[test]
fn single_slots_append_to_the_sort_order() {
    let mut persistence = test_persistence();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "ordered");

    create_test_slot(&mut persistence, &owner, event_id, 0);
    create_test_slot(&mut persistence, &owner, event_id, 30);

    let slots = persistence
        .list_slots_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].sort_order, 1);
    assert_eq!(slots[1].sort_order, 2);
}

#[test]
fn inverted_times_are_rejected() {
    let mut persistence = test_persistence();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "inverted");

    let err = handlers::create_slot(
        &mut persistence,
        &owner,
        CreateSlotRequest {
            event_id,
            starts_at: event_start(),
            ends_at: event_start() - Duration::minutes(30),
            label: None,
        },
        now(),
    )
    .expect_err("create must fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "ends_at"));
}

#[test]
fn colliding_start_time_is_a_conflict() {
    let mut persistence = test_persistence();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "collide");
    create_test_slot(&mut persistence, &owner, event_id, 0);

    let err = handlers::create_slot(
        &mut persistence,
        &owner,
        CreateSlotRequest {
            event_id,
            starts_at: event_start(),
            ends_at: event_start() + Duration::minutes(45),
            label: None,
        },
        now(),
    )
    .expect_err("create must fail");
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_slot_start"));
}

#[test]
fn generation_fills_the_range_with_numbered_labels() {
    let mut persistence = test_persistence();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "generated");

    let slot_ids = handlers::generate_slots(
        &mut persistence,
        &owner,
        GenerateSlotsRequest {
            event_id,
            range_start: event_start(),
            range_end: event_start() + Duration::minutes(100),
            duration_minutes: 30,
            label_template: Some(String::from("Shift {{n}}")),
        },
        now(),
    )
    .expect("generation succeeds");
    assert_eq!(slot_ids.len(), 3);

    let slots = persistence
        .list_slots_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(slots[0].label.as_deref(), Some("Shift 1"));
    assert_eq!(slots[2].label.as_deref(), Some("Shift 3"));
}

#[test]
fn empty_generation_plan_is_invalid() {
    let mut persistence = test_persistence();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "empty-plan");

    let err = handlers::generate_slots(
        &mut persistence,
        &owner,
        GenerateSlotsRequest {
            event_id,
            range_start: event_start(),
            range_end: event_start() + Duration::minutes(10),
            duration_minutes: 30,
            label_template: None,
        },
        now(),
    )
    .expect_err("generation must fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "range"));
}

#[test]
fn deleting_a_booked_slot_cancels_and_notifies_the_holder() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "teardown");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);
    let booking_id = book_slot(&mut persistence, &notifier, "teardown", slot_id, "held@example.com");

    handlers::delete_slot(&mut persistence, &notifier, &owner, slot_id, now())
        .expect("delete succeeds");

    assert!(persistence
        .get_slot(slot_id)
        .expect("query succeeds")
        .is_none());
    // The cancelled booking went with the slot, but the holder was told.
    assert!(persistence
        .get_booking(booking_id)
        .expect("query succeeds")
        .is_none());
    let subjects = notifier.email_subjects_for("held@example.com");
    assert!(subjects.iter().any(|s| s.contains("was removed")));

    // The cancellation and removal are both on the audit trail.
    let entries = persistence
        .audit_for_event(event_id)
        .expect("query succeeds");
    assert!(entries.iter().any(|e| e.action == "booking_cancelled"));
    assert!(entries.iter().any(|e| e.action == "slot_deleted"));
}

#[test]
fn non_managers_may_not_delete_slots() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let stranger = create_test_actor(&mut persistence, "stranger@example.com");
    let event_id = create_test_event(&mut persistence, &owner, "guarded");
    let slot_id = create_test_slot(&mut persistence, &owner, event_id, 0);

    let err = handlers::delete_slot(&mut persistence, &notifier, &stranger, slot_id, now())
        .expect_err("delete must be denied");
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    assert!(persistence
        .get_slot(slot_id)
        .expect("query succeeds")
        .is_some());
}
