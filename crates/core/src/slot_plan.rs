// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use slotbook_domain::{validate_slot_duration, validate_slot_label};
use time::{Duration, OffsetDateTime};

/// One slot produced by bulk generation, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSlot {
    /// When the slot begins.
    pub starts_at: OffsetDateTime,
    /// When the slot ends.
    pub ends_at: OffsetDateTime,
    /// Label with any `{{n}}` placeholder substituted.
    pub label: Option<String>,
    /// Position in organizer-defined ordering.
    pub sort_order: i64,
}

/// Generates consecutive slots of fixed duration over a time range.
///
/// Slots are laid back-to-back from `range_start`; generation stops at the
/// last slot that ends on or before `range_end`. An optional label template
/// may contain `{{n}}`, replaced with the 1-based slot number.
///
/// # Arguments
///
/// * `range_start` - Start of the generation range
/// * `range_end` - End of the generation range
/// * `duration_minutes` - Length of each slot, 5–480 minutes
/// * `label_template` - Optional template for slot labels
/// * `first_sort_order` - Sort order assigned to the first generated slot
///
/// # Errors
///
/// Returns an error if the duration is out of bounds, the template is too
/// long, or no slot fits the range.
pub fn plan_slots(
    range_start: OffsetDateTime,
    range_end: OffsetDateTime,
    duration_minutes: i64,
    label_template: Option<&str>,
    first_sort_order: i64,
) -> Result<Vec<PlannedSlot>, CoreError> {
    validate_slot_duration(duration_minutes)?;
    validate_slot_label(label_template)?;

    let duration: Duration = Duration::minutes(duration_minutes);
    let mut slots: Vec<PlannedSlot> = Vec::new();
    let mut current: OffsetDateTime = range_start;
    let mut number: i64 = 1;

    while current < range_end {
        let slot_end: OffsetDateTime = current + duration;
        if slot_end > range_end {
            break;
        }

        let label: Option<String> =
            label_template.map(|template| template.replace("{{n}}", &number.to_string()));

        slots.push(PlannedSlot {
            starts_at: current,
            ends_at: slot_end,
            label,
            sort_order: first_sort_order + number - 1,
        });

        current = slot_end;
        number += 1;
    }

    if slots.is_empty() {
        return Err(CoreError::EmptySlotPlan);
    }

    Ok(slots)
}
