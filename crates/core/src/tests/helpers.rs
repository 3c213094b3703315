// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::{Booking, BookingStatus, ContactInfo, Event, Slot, WaitlistEntry};
use time::macros::datetime;

pub fn event_with_id(event_id: i64) -> Event {
    let mut event = Event::new("Open House", "open-house", datetime!(2026-09-01 09:00 UTC), 1);
    event.event_id = Some(event_id);
    event
}

pub fn slot_with_id(slot_id: i64, event_id: i64) -> Slot {
    let mut slot = Slot::new(
        event_id,
        datetime!(2026-09-01 10:00 UTC),
        datetime!(2026-09-01 10:30 UTC),
        None,
        0,
    );
    slot.slot_id = Some(slot_id);
    slot
}

pub fn confirmed_booking(booking_id: i64, slot_id: i64, event_id: i64, user_id: i64) -> Booking {
    let mut booking = Booking::new(slot_id, event_id, ContactInfo::new("p@example.com"));
    booking.booking_id = Some(booking_id);
    booking.user_id = Some(user_id);
    booking
}

pub fn cancelled_booking(booking_id: i64, slot_id: i64, event_id: i64, user_id: i64) -> Booking {
    let mut booking = confirmed_booking(booking_id, slot_id, event_id, user_id);
    booking.status = BookingStatus::Cancelled;
    booking
}

pub fn waitlist_entry(waitlist_id: i64, slot_id: i64, position: i64) -> WaitlistEntry {
    WaitlistEntry {
        waitlist_id: Some(waitlist_id),
        slot_id,
        event_id: 1,
        team_id: None,
        contact: ContactInfo::new("queued@example.com"),
        user_id: None,
        position,
    }
}
