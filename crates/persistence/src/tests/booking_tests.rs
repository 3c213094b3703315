// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_booking, create_test_event, create_test_slot, test_persistence};
use crate::PersistenceError;
use slotbook_domain::{Booking, BookingStatus, ContactInfo};

#[test]
fn second_confirmed_booking_on_a_slot_loses() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "booking-conflict");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    create_test_booking(&mut persistence, slot_id, event_id, "first@example.com");

    let rival = Booking::new(slot_id, event_id, ContactInfo::new("second@example.com"));
    assert_eq!(
        persistence.insert_confirmed_booking(&rival),
        Err(PersistenceError::ConfirmedBookingExists { slot_id })
    );
}

#[test]
fn cancelled_slot_accepts_a_new_booking() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "booking-reclaim");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    let first = create_test_booking(&mut persistence, slot_id, event_id, "first@example.com");
    persistence
        .set_booking_status(first, BookingStatus::Cancelled)
        .expect("booking cancelled");

    let second = create_test_booking(&mut persistence, slot_id, event_id, "second@example.com");

    let holder = persistence
        .confirmed_booking_for_slot(slot_id)
        .expect("query succeeds")
        .expect("slot held");
    assert_eq!(holder.booking_id, Some(second));
}

#[test]
fn status_update_of_missing_booking_reports_not_found() {
    let mut persistence = test_persistence();

    assert_eq!(
        persistence.set_booking_status(404, BookingStatus::Cancelled),
        Err(PersistenceError::BookingNotFound(404))
    );
}

#[test]
fn confirmed_bookings_for_slots_skips_cancelled() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "booking-multi");
    let first_slot = create_test_slot(&mut persistence, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, event_id, 30);
    let third_slot = create_test_slot(&mut persistence, event_id, 60);

    let kept = create_test_booking(&mut persistence, first_slot, event_id, "kept@example.com");
    let dropped =
        create_test_booking(&mut persistence, second_slot, event_id, "gone@example.com");
    persistence
        .set_booking_status(dropped, BookingStatus::Cancelled)
        .expect("booking cancelled");

    let confirmed = persistence
        .confirmed_bookings_for_slots(&[first_slot, second_slot, third_slot])
        .expect("query succeeds");
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].booking_id, Some(kept));

    assert!(persistence
        .confirmed_bookings_for_slots(&[])
        .expect("query succeeds")
        .is_empty());
}

#[test]
fn per_email_count_matches_case_insensitively() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "booking-count");
    let first_slot = create_test_slot(&mut persistence, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, event_id, 30);

    create_test_booking(&mut persistence, first_slot, event_id, "Player@Example.com");
    create_test_booking(&mut persistence, second_slot, event_id, "player@example.com");

    let count = persistence
        .count_confirmed_bookings_for_email(event_id, "PLAYER@example.com")
        .expect("query succeeds");
    assert_eq!(count, 2);
}

#[test]
fn event_listing_includes_all_statuses() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "booking-list");
    let first_slot = create_test_slot(&mut persistence, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, event_id, 30);

    create_test_booking(&mut persistence, first_slot, event_id, "a@example.com");
    let cancelled = create_test_booking(&mut persistence, second_slot, event_id, "b@example.com");
    persistence
        .set_booking_status(cancelled, BookingStatus::Cancelled)
        .expect("booking cancelled");

    let all = persistence
        .list_bookings_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(all.len(), 2);
}
