// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::waitlist::next_waitlist_position;
use slotbook_domain::{Event, Slot};

/// The outcome of signup resolution: exactly one of a confirmed booking or a
/// waitlist entry. Rejections are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupResolution {
    /// Insert a confirmed booking for the slot.
    Confirm,
    /// Append a waitlist entry at the given position.
    Waitlist {
        /// The FIFO position for the new entry.
        position: i64,
    },
}

/// Resolves a signup request against the observed slot state.
///
/// The caller supplies what it saw in the store: whether the slot currently
/// holds a confirmed booking, and the highest waitlist position for the slot.
/// When a `Confirm` decision subsequently loses an insert race (the store
/// reports a uniqueness conflict), the caller re-invokes this function with
/// `slot_taken = true` — the store's constraint, not this function, is the
/// arbiter of who won.
///
/// # Arguments
///
/// * `slot` - The slot being claimed
/// * `event` - The event the caller claims the slot belongs to
/// * `slot_taken` - Whether a confirmed booking was observed on the slot
/// * `join_waitlist` - Whether the caller asked to be waitlisted if full
/// * `max_waitlist_position` - Highest existing position on the slot's
///   waitlist, if any
///
/// # Errors
///
/// Returns an error if:
/// - The slot does not belong to the stated event
/// - The slot is taken and waitlisting was not requested or the event
///   disallows it
pub fn resolve_signup(
    slot: &Slot,
    event: &Event,
    slot_taken: bool,
    join_waitlist: bool,
    max_waitlist_position: Option<i64>,
) -> Result<SignupResolution, CoreError> {
    let slot_id: i64 = slot.slot_id.unwrap_or(-1);
    let event_id: i64 = event.event_id.unwrap_or(-1);

    // Rule: the slot must belong to the stated event
    if slot.event_id != event_id {
        return Err(CoreError::SlotNotInEvent { slot_id, event_id });
    }

    if !slot_taken {
        return Ok(SignupResolution::Confirm);
    }

    // Rule: waitlisting requires both the caller's request and the event flag
    if join_waitlist && event.allow_waitlist {
        return Ok(SignupResolution::Waitlist {
            position: next_waitlist_position(max_waitlist_position),
        });
    }

    Err(CoreError::SlotTaken { slot_id })
}
