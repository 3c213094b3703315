// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_event, create_test_slot, test_persistence};
use crate::PersistenceError;
use slotbook_domain::{ContactInfo, WaitlistEntry};

fn entry(slot_id: i64, event_id: i64, email: &str, position: i64) -> WaitlistEntry {
    WaitlistEntry {
        waitlist_id: None,
        slot_id,
        event_id,
        team_id: None,
        contact: ContactInfo::new(email),
        user_id: None,
        position,
    }
}

#[test]
fn entries_come_back_in_position_order() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "wl-order");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    persistence
        .insert_waitlist_entry(&entry(slot_id, event_id, "second@example.com", 2))
        .expect("entry created");
    persistence
        .insert_waitlist_entry(&entry(slot_id, event_id, "first@example.com", 1))
        .expect("entry created");

    let queue = persistence
        .waitlist_for_slot(slot_id)
        .expect("query succeeds");
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].contact.email, "first@example.com");
    assert_eq!(queue[1].contact.email, "second@example.com");

    assert_eq!(
        persistence
            .max_waitlist_position(slot_id)
            .expect("query succeeds"),
        Some(2)
    );
}

#[test]
fn empty_waitlist_has_no_max_position() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "wl-empty");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    assert_eq!(
        persistence
            .max_waitlist_position(slot_id)
            .expect("query succeeds"),
        None
    );
}

#[test]
fn duplicate_position_within_slot_is_rejected() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "wl-dup");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    persistence
        .insert_waitlist_entry(&entry(slot_id, event_id, "a@example.com", 1))
        .expect("entry created");
    assert!(persistence
        .insert_waitlist_entry(&entry(slot_id, event_id, "b@example.com", 1))
        .is_err());
}

#[test]
fn deleted_entry_leaves_the_queue() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "wl-delete");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);

    let waitlist_id = persistence
        .insert_waitlist_entry(&entry(slot_id, event_id, "a@example.com", 1))
        .expect("entry created");

    persistence
        .delete_waitlist_entry(waitlist_id)
        .expect("entry deleted");

    assert!(persistence
        .waitlist_for_slot(slot_id)
        .expect("query succeeds")
        .is_empty());
    assert_eq!(
        persistence.delete_waitlist_entry(waitlist_id),
        Err(PersistenceError::WaitlistEntryNotFound(waitlist_id))
    );
}

#[test]
fn event_listing_spans_slots() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "wl-event");
    let first_slot = create_test_slot(&mut persistence, event_id, 0);
    let second_slot = create_test_slot(&mut persistence, event_id, 30);

    persistence
        .insert_waitlist_entry(&entry(first_slot, event_id, "a@example.com", 1))
        .expect("entry created");
    persistence
        .insert_waitlist_entry(&entry(second_slot, event_id, "b@example.com", 1))
        .expect("entry created");

    let all = persistence
        .waitlist_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(all.len(), 2);
}
