// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod booking_tests;
mod event_tests;
mod reminder_tests;
mod waitlist_tests;

use crate::Persistence;
use slotbook_domain::{Booking, ContactInfo, Event, Slot};
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn event_start() -> OffsetDateTime {
    datetime!(2026-09-01 09:00 UTC)
}

pub fn create_test_owner(persistence: &mut Persistence) -> i64 {
    persistence
        .create_participant("owner@example.com", "$2b$12$testhash", Some("Owner"))
        .expect("participant created")
}

pub fn create_test_event(persistence: &mut Persistence, slug: &str) -> i64 {
    let owner_id = persistence
        .create_participant(&format!("{slug}-owner@example.com"), "$2b$12$testhash", None)
        .expect("participant created");
    let event = Event::new("Scrimmage Day", slug, event_start(), owner_id);
    persistence.create_event(&event).expect("event created")
}

pub fn create_test_slot(persistence: &mut Persistence, event_id: i64, offset_minutes: i64) -> i64 {
    let starts_at = event_start() + Duration::minutes(offset_minutes);
    let slot = Slot::new(event_id, starts_at, starts_at + Duration::minutes(30), None, 0);
    persistence.create_slot(&slot).expect("slot created")
}

pub fn create_test_booking(
    persistence: &mut Persistence,
    slot_id: i64,
    event_id: i64,
    email: &str,
) -> i64 {
    let booking = Booking::new(slot_id, event_id, ContactInfo::new(email));
    persistence
        .insert_confirmed_booking(&booking)
        .expect("booking created")
}
