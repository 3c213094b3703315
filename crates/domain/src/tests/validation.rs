// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Event;
use crate::validation::{
    validate_contact, validate_event_fields, validate_slot_duration, validate_slot_label,
    validate_slot_times, validate_slug,
};
use time::macros::datetime;

fn sample_event() -> Event {
    Event::new("Open House", "open-house", datetime!(2026-09-01 09:00 UTC), 1)
}

#[test]
fn accepts_url_safe_slug() {
    assert!(validate_slug("fall-signups-2026").is_ok());
}

#[test]
fn rejects_empty_slug() {
    assert!(matches!(
        validate_slug(""),
        Err(DomainError::InvalidSlug(_))
    ));
}

#[test]
fn rejects_slug_with_uppercase_or_spaces() {
    assert!(validate_slug("Fall-Signups").is_err());
    assert!(validate_slug("fall signups").is_err());
    assert!(validate_slug("fall_signups").is_err());
}

#[test]
fn accepts_well_formed_event() {
    assert!(validate_event_fields(&sample_event()).is_ok());
}

#[test]
fn rejects_empty_title() {
    let mut event = sample_event();
    event.title = String::from("   ");
    assert!(matches!(
        validate_event_fields(&event),
        Err(DomainError::InvalidTitle(_))
    ));
}

#[test]
fn rejects_zero_max_signups() {
    let mut event = sample_event();
    event.max_signups_per_participant = 0;
    assert_eq!(
        validate_event_fields(&event),
        Err(DomainError::InvalidMaxSignups { count: 0 })
    );
}

#[test]
fn rejects_slot_ending_before_it_starts() {
    let starts_at = datetime!(2026-09-01 10:00 UTC);
    let ends_at = datetime!(2026-09-01 09:30 UTC);
    assert_eq!(
        validate_slot_times(starts_at, ends_at),
        Err(DomainError::InvalidSlotTimes { starts_at, ends_at })
    );
}

#[test]
fn rejects_zero_length_slot() {
    let at = datetime!(2026-09-01 10:00 UTC);
    assert!(validate_slot_times(at, at).is_err());
}

#[test]
fn accepts_ordered_slot_times() {
    assert!(
        validate_slot_times(datetime!(2026-09-01 10:00 UTC), datetime!(2026-09-01 10:30 UTC))
            .is_ok()
    );
}

#[test]
fn slot_duration_bounds_are_inclusive() {
    assert!(validate_slot_duration(5).is_ok());
    assert!(validate_slot_duration(480).is_ok());
    assert_eq!(
        validate_slot_duration(4),
        Err(DomainError::InvalidSlotDuration { minutes: 4 })
    );
    assert_eq!(
        validate_slot_duration(481),
        Err(DomainError::InvalidSlotDuration { minutes: 481 })
    );
}

#[test]
fn label_up_to_200_chars_is_accepted() {
    let label: String = "x".repeat(200);
    assert!(validate_slot_label(Some(&label)).is_ok());
    assert!(validate_slot_label(None).is_ok());
}

#[test]
fn label_over_200_chars_is_rejected() {
    let label: String = "x".repeat(201);
    assert_eq!(
        validate_slot_label(Some(&label)),
        Err(DomainError::InvalidSlotLabel { length: 201 })
    );
}

#[test]
fn accepts_plain_email() {
    assert!(validate_contact("p1@example.com").is_ok());
}

#[test]
fn rejects_malformed_emails() {
    assert!(validate_contact("").is_err());
    assert!(validate_contact("no-at-sign").is_err());
    assert!(validate_contact("@example.com").is_err());
    assert!(validate_contact("p1@").is_err());
    assert!(validate_contact("a@b@c").is_err());
}
