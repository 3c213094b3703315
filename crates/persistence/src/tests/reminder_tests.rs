// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_booking, create_test_event, create_test_slot, test_persistence};
use slotbook_core::ReminderKind;
use time::macros::datetime;

#[test]
fn first_record_wins_and_repeats_are_skipped() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "rem-dedup");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);
    let booking_id = create_test_booking(&mut persistence, slot_id, event_id, "p@example.com");

    let sent_at = datetime!(2026-08-31 09:00 UTC);

    assert!(persistence
        .record_reminder_sent(booking_id, ReminderKind::DayBefore, sent_at)
        .expect("record succeeds"));
    assert!(!persistence
        .record_reminder_sent(booking_id, ReminderKind::DayBefore, sent_at)
        .expect("record succeeds"));

    assert!(persistence
        .reminder_already_sent(booking_id, ReminderKind::DayBefore)
        .expect("query succeeds"));
}

#[test]
fn kinds_are_tracked_independently() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "rem-kinds");
    let slot_id = create_test_slot(&mut persistence, event_id, 0);
    let booking_id = create_test_booking(&mut persistence, slot_id, event_id, "p@example.com");

    let sent_at = datetime!(2026-08-31 09:00 UTC);

    assert!(persistence
        .record_reminder_sent(booking_id, ReminderKind::DayBefore, sent_at)
        .expect("record succeeds"));
    assert!(persistence
        .record_reminder_sent(booking_id, ReminderKind::HalfHour, sent_at)
        .expect("record succeeds"));

    assert!(!persistence
        .reminder_already_sent(booking_id, ReminderKind::QuarterHour)
        .expect("query succeeds"));
}
