// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use slotbook_domain::{Booking, BookingStatus, Event, SwapRequest};

/// Validates the creation of a swap request.
///
/// Ownership of the requester booking is an authorization concern checked by
/// the caller before invoking this function; everything structural is
/// checked here, in the order the rules are stated: self-swap first (before
/// any store mutation), then event flag, then booking states, then the
/// duplicate guard.
///
/// # Arguments
///
/// * `event` - The event both bookings must belong to
/// * `requester` - The booking whose owner is asking for the swap
/// * `target` - The booking whose owner must respond
/// * `has_pending_duplicate` - Whether a pending request for the same
///   (requester, target) pair was observed in the store
///
/// # Errors
///
/// Returns an error if:
/// - Requester and target are the same booking
/// - The event disallows swaps
/// - Either booking is not confirmed
/// - The bookings belong to different events
/// - An identical pending request already exists
pub fn validate_swap_request(
    event: &Event,
    requester: &Booking,
    target: &Booking,
    has_pending_duplicate: bool,
) -> Result<(), CoreError> {
    let requester_id: i64 = requester.booking_id.unwrap_or(-1);
    let target_id: i64 = target.booking_id.unwrap_or(-1);

    if requester_id == target_id {
        return Err(CoreError::SameBookingSwap);
    }

    if !event.allow_swap {
        return Err(CoreError::SwapNotAllowed {
            event_id: event.event_id.unwrap_or(-1),
        });
    }

    if requester.status != BookingStatus::Confirmed {
        return Err(CoreError::BookingNotConfirmed {
            booking_id: requester_id,
        });
    }

    if target.status != BookingStatus::Confirmed {
        return Err(CoreError::BookingNotConfirmed {
            booking_id: target_id,
        });
    }

    if requester.event_id != target.event_id {
        return Err(CoreError::SwapAcrossEvents {
            requester_event_id: requester.event_id,
            target_event_id: target.event_id,
        });
    }

    if has_pending_duplicate {
        return Err(CoreError::DuplicatePendingSwap {
            requester_booking_id: requester_id,
            target_booking_id: target_id,
        });
    }

    Ok(())
}

/// Validates a response (accept or decline) to a swap request.
///
/// Only pending requests may be responded to; `pending → accepted` and
/// `pending → declined` are the sole transitions and both are terminal.
/// For acceptance both bookings must still be confirmed — the request may
/// have been outrun by a cancellation since it was created.
///
/// # Arguments
///
/// * `swap` - The swap request being responded to
/// * `requester` - The requester booking as currently stored
/// * `target` - The target booking as currently stored
/// * `accepting` - `true` for accept, `false` for decline
///
/// # Errors
///
/// Returns an error if the request is no longer pending, or if `accepting`
/// and either booking is no longer confirmed.
pub fn validate_swap_response(
    swap: &SwapRequest,
    requester: &Booking,
    target: &Booking,
    accepting: bool,
) -> Result<(), CoreError> {
    if swap.status.is_terminal() {
        return Err(CoreError::SwapAlreadyResolved {
            status: swap.status,
        });
    }

    if accepting {
        if requester.status != BookingStatus::Confirmed {
            return Err(CoreError::BookingNotConfirmed {
                booking_id: requester.booking_id.unwrap_or(-1),
            });
        }
        if target.status != BookingStatus::Confirmed {
            return Err(CoreError::BookingNotConfirmed {
                booking_id: target.booking_id.unwrap_or(-1),
            });
        }
    }

    Ok(())
}
