// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::slot_plan::plan_slots;
use slotbook_domain::DomainError;
use time::macros::datetime;

#[test]
fn fills_range_with_back_to_back_slots() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 11:00 UTC),
        30,
        None,
        0,
    );

    let slots = plan.unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].starts_at, datetime!(2026-09-01 09:00 UTC));
    assert_eq!(slots[0].ends_at, datetime!(2026-09-01 09:30 UTC));
    assert_eq!(slots[3].starts_at, datetime!(2026-09-01 10:30 UTC));
    assert_eq!(slots[3].ends_at, datetime!(2026-09-01 11:00 UTC));
}

#[test]
fn partial_trailing_slot_is_dropped() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 10:15 UTC),
        30,
        None,
        0,
    );

    let slots = plan.unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].ends_at, datetime!(2026-09-01 10:00 UTC));
}

#[test]
fn label_template_substitutes_slot_number() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 10:00 UTC),
        30,
        Some("Station {{n}}"),
        0,
    );

    let slots = plan.unwrap();
    assert_eq!(slots[0].label.as_deref(), Some("Station 1"));
    assert_eq!(slots[1].label.as_deref(), Some("Station 2"));
}

#[test]
fn sort_order_continues_from_existing_slots() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 10:00 UTC),
        30,
        None,
        5,
    );

    let slots = plan.unwrap();
    assert_eq!(slots[0].sort_order, 5);
    assert_eq!(slots[1].sort_order, 6);
}

#[test]
fn range_too_small_for_one_slot_is_rejected() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 09:20 UTC),
        30,
        None,
        0,
    );

    assert_eq!(plan, Err(CoreError::EmptySlotPlan));
}

#[test]
fn inverted_range_is_rejected() {
    let plan = plan_slots(
        datetime!(2026-09-01 11:00 UTC),
        datetime!(2026-09-01 09:00 UTC),
        30,
        None,
        0,
    );

    assert_eq!(plan, Err(CoreError::EmptySlotPlan));
}

#[test]
fn out_of_bounds_duration_is_rejected() {
    let plan = plan_slots(
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 11:00 UTC),
        481,
        None,
        0,
    );

    assert_eq!(
        plan,
        Err(CoreError::DomainViolation(DomainError::InvalidSlotDuration {
            minutes: 481
        }))
    );
}
