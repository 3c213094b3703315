// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_event, test_persistence};
use slotbook_audit::{Action, Actor, AuditRecord};
use time::macros::datetime;

fn record(event_id: i64, action: &str, resource_id: Option<i64>) -> AuditRecord {
    AuditRecord::new(
        Actor::new(String::from("42"), String::from("participant")),
        Action::new(action.to_string(), None),
        Some(event_id),
        String::from("booking"),
        resource_id,
    )
}

#[test]
fn records_come_back_in_append_order() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "audit-order");

    let recorded_at = datetime!(2026-08-28 10:00 UTC);
    persistence
        .record_audit(&record(event_id, "booking_created", Some(1)), recorded_at)
        .expect("record appended");
    persistence
        .record_audit(&record(event_id, "booking_cancelled", Some(1)), recorded_at)
        .expect("record appended");

    let entries = persistence
        .audit_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "booking_created");
    assert_eq!(entries[1].action, "booking_cancelled");
    assert_eq!(entries[0].actor_id, "42");
    assert_eq!(entries[0].created_at, recorded_at);
}

#[test]
fn details_and_system_actors_round_trip() {
    let mut persistence = test_persistence();
    let event_id = create_test_event(&mut persistence, "audit-system");

    let sweep = AuditRecord::new(
        Actor::new(String::from("reminder-sweep"), String::from("system")),
        Action::new(
            String::from("reminders_sent"),
            Some(String::from("{\"count\":3}")),
        ),
        Some(event_id),
        String::from("booking"),
        None,
    );

    persistence
        .record_audit(&sweep, datetime!(2026-08-28 10:00 UTC))
        .expect("record appended");

    let entries = persistence
        .audit_for_event(event_id)
        .expect("query succeeds");
    assert_eq!(entries[0].actor_type, "system");
    assert_eq!(entries[0].details.as_deref(), Some("{\"count\":3}"));
    assert_eq!(entries[0].resource_id, None);
}

#[test]
fn entries_are_scoped_to_their_event() {
    let mut persistence = test_persistence();
    let first_event = create_test_event(&mut persistence, "audit-a");
    let second_event = create_test_event(&mut persistence, "audit-b");

    persistence
        .record_audit(
            &record(first_event, "booking_created", Some(1)),
            datetime!(2026-08-28 10:00 UTC),
        )
        .expect("record appended");

    assert_eq!(
        persistence
            .audit_for_event(first_event)
            .expect("query succeeds")
            .len(),
        1
    );
    assert!(persistence
        .audit_for_event(second_event)
        .expect("query succeeds")
        .is_empty());
}
