// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingNotifier, book_slot, create_test_actor, create_test_event, create_test_slot, now,
    test_persistence,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::CreateSwapRequest;
use slotbook_domain::SwapStatus;

struct SwapFixture {
    event_id: i64,
    first_slot: i64,
    second_slot: i64,
    alice_booking: i64,
    bob_booking: i64,
}

/// Two bookings on one event, held by alice and bob.
fn two_bookings(
    persistence: &mut slotbook_persistence::Persistence,
    notifier: &RecordingNotifier,
    slug: &str,
) -> SwapFixture {
    let owner = create_test_actor(persistence, &format!("owner-{slug}@example.com"));
    let event_id = create_test_event(persistence, &owner, slug);
    let first_slot = create_test_slot(persistence, &owner, event_id, 0);
    let second_slot = create_test_slot(persistence, &owner, event_id, 30);
    let alice_booking = book_slot(persistence, notifier, slug, first_slot, "alice@example.com");
    let bob_booking = book_slot(persistence, notifier, slug, second_slot, "bob@example.com");
    SwapFixture {
        event_id,
        first_slot,
        second_slot,
        alice_booking,
        bob_booking,
    }
}

#[test]
fn accepted_swap_exchanges_the_slots_and_tells_both_sides() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "trade");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let bob = create_test_actor(&mut persistence, "bob@example.com");

    let swap_id = handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect("request succeeds");

    let resolution = handlers::respond_to_swap(&mut persistence, &notifier, &bob, swap_id, true, now())
        .expect("acceptance succeeds");
    assert_eq!(resolution.status, SwapStatus::Accepted);

    let alice_after = persistence
        .get_booking(fixture.alice_booking)
        .expect("query succeeds")
        .expect("booking found");
    let bob_after = persistence
        .get_booking(fixture.bob_booking)
        .expect("query succeeds")
        .expect("booking found");
    assert_eq!(alice_after.slot_id, fixture.second_slot);
    assert_eq!(bob_after.slot_id, fixture.first_slot);

    // Request notice to bob, then a result notice to each side.
    assert!(!notifier.email_subjects_for("bob@example.com").is_empty());
    assert!(!notifier.email_subjects_for("alice@example.com").is_empty());
}

#[test]
fn declined_swap_leaves_both_bookings_alone() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "refused");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let bob = create_test_actor(&mut persistence, "bob@example.com");

    let swap_id = handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect("request succeeds");

    let resolution =
        handlers::respond_to_swap(&mut persistence, &notifier, &bob, swap_id, false, now())
            .expect("decline succeeds");
    assert_eq!(resolution.status, SwapStatus::Declined);

    let alice_after = persistence
        .get_booking(fixture.alice_booking)
        .expect("query succeeds")
        .expect("booking found");
    assert_eq!(alice_after.slot_id, fixture.first_slot);

    // A resolved request cannot be answered again.
    let err = handlers::respond_to_swap(&mut persistence, &notifier, &bob, swap_id, true, now())
        .expect_err("second response must fail");
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "swap_pending"));
}

#[test]
fn only_the_target_holder_may_respond() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "meddled");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let swap_id = handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect("request succeeds");

    // The requester cannot accept their own request.
    let err = handlers::respond_to_swap(&mut persistence, &notifier, &alice, swap_id, true, now())
        .expect_err("requester must be denied");
    assert!(matches!(err, ApiError::Unauthorized { ref action, .. } if action == "respond_to_swap"));
}

#[test]
fn only_the_booking_holder_may_request() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "impersonated");

    let stranger = create_test_actor(&mut persistence, "stranger@example.com");
    let err = handlers::request_swap(
        &mut persistence,
        &notifier,
        &stranger,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect_err("request must be denied");
    assert!(matches!(err, ApiError::Unauthorized { ref action, .. } if action == "request_swap"));
}

#[test]
fn swaps_can_be_disabled_per_event() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let owner = create_test_actor(&mut persistence, "owner@example.com");
    let mut request = super::helpers::event_request("no-trades");
    request.allow_swap = false;
    let event_id =
        handlers::create_event(&mut persistence, &owner, request, now()).expect("event created");
    let first_slot = create_test_slot(&mut persistence, &owner, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, &owner, event_id, 30);
    let alice_booking =
        book_slot(&mut persistence, &notifier, "no-trades", first_slot, "alice@example.com");
    let bob_booking =
        book_slot(&mut persistence, &notifier, "no-trades", second_slot, "bob@example.com");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let err = handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: alice_booking,
            target_booking_id: bob_booking,
        },
        now(),
    )
    .expect_err("request must fail");
    assert!(
        matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "swaps_enabled")
    );
}

#[test]
fn duplicate_pending_requests_are_rejected() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "doubled");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let request = CreateSwapRequest {
        requester_booking_id: fixture.alice_booking,
        target_booking_id: fixture.bob_booking,
    };
    handlers::request_swap(&mut persistence, &notifier, &alice, request.clone(), now())
        .expect("first request succeeds");

    let err = handlers::request_swap(&mut persistence, &notifier, &alice, request, now())
        .expect_err("second request must fail");
    assert!(
        matches!(err, ApiError::Conflict { ref rule, .. } if rule == "one_pending_swap_per_pair")
    );
}

#[test]
fn a_counter_offer_is_not_a_duplicate() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "countered");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let bob = create_test_actor(&mut persistence, "bob@example.com");
    handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect("request succeeds");

    // Bob answers with a request of his own rather than accepting;
    // both requests now sit pending side by side.
    let counter_id = handlers::request_swap(
        &mut persistence,
        &notifier,
        &bob,
        CreateSwapRequest {
            requester_booking_id: fixture.bob_booking,
            target_booking_id: fixture.alice_booking,
        },
        now(),
    )
    .expect("counter-offer succeeds");

    let counter = persistence
        .get_swap(counter_id)
        .expect("query succeeds")
        .expect("swap found");
    assert_eq!(counter.status, SwapStatus::Pending);
}

#[test]
fn pending_listing_covers_both_sides_of_a_request() {
    let mut persistence = test_persistence();
    let notifier = RecordingNotifier::default();
    let fixture = two_bookings(&mut persistence, &notifier, "listed");

    let alice = create_test_actor(&mut persistence, "alice@example.com");
    let bob = create_test_actor(&mut persistence, "bob@example.com");
    let swap_id = handlers::request_swap(
        &mut persistence,
        &notifier,
        &alice,
        CreateSwapRequest {
            requester_booking_id: fixture.alice_booking,
            target_booking_id: fixture.bob_booking,
        },
        now(),
    )
    .expect("request succeeds");

    for actor in [&alice, &bob] {
        let pending = handlers::list_pending_swaps(&mut persistence, actor, fixture.event_id)
            .expect("listing succeeds");
        assert_eq!(pending.swaps.len(), 1);
        assert_eq!(pending.swaps[0].swap_id, Some(swap_id));
    }

    let outsider = create_test_actor(&mut persistence, "outsider@example.com");
    let pending = handlers::list_pending_swaps(&mut persistence, &outsider, fixture.event_id)
        .expect("listing succeeds");
    assert!(pending.swaps.is_empty());
}
