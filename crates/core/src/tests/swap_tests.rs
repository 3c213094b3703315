// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::swap::{validate_swap_request, validate_swap_response};
use crate::tests::helpers::{cancelled_booking, confirmed_booking, event_with_id};
use slotbook_domain::{SwapRequest, SwapStatus};

fn pending_swap(requester_booking_id: i64, target_booking_id: i64) -> SwapRequest {
    SwapRequest {
        swap_id: Some(1),
        event_id: 1,
        requester_booking_id,
        target_booking_id,
        status: SwapStatus::Pending,
        responded_at: None,
    }
}

#[test]
fn valid_request_passes() {
    let event = event_with_id(1);
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert!(validate_swap_request(&event, &requester, &target, false).is_ok());
}

#[test]
fn self_swap_is_rejected_first() {
    // Even with every other precondition violated, the self-swap check wins:
    // it must fire before any store access.
    let mut event = event_with_id(1);
    event.allow_swap = false;
    let booking = cancelled_booking(100, 10, 1, 1);

    assert_eq!(
        validate_swap_request(&event, &booking, &booking, true),
        Err(CoreError::SameBookingSwap)
    );
}

#[test]
fn event_without_swaps_rejects_request() {
    let mut event = event_with_id(1);
    event.allow_swap = false;
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert_eq!(
        validate_swap_request(&event, &requester, &target, false),
        Err(CoreError::SwapNotAllowed { event_id: 1 })
    );
}

#[test]
fn cancelled_requester_booking_is_rejected() {
    let event = event_with_id(1);
    let requester = cancelled_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert_eq!(
        validate_swap_request(&event, &requester, &target, false),
        Err(CoreError::BookingNotConfirmed { booking_id: 100 })
    );
}

#[test]
fn cancelled_target_booking_is_rejected() {
    let event = event_with_id(1);
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = cancelled_booking(200, 20, 1, 2);

    assert_eq!(
        validate_swap_request(&event, &requester, &target, false),
        Err(CoreError::BookingNotConfirmed { booking_id: 200 })
    );
}

#[test]
fn cross_event_swap_is_rejected() {
    let event = event_with_id(1);
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 2, 2);

    assert_eq!(
        validate_swap_request(&event, &requester, &target, false),
        Err(CoreError::SwapAcrossEvents {
            requester_event_id: 1,
            target_event_id: 2
        })
    );
}

#[test]
fn duplicate_pending_request_conflicts() {
    let event = event_with_id(1);
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert_eq!(
        validate_swap_request(&event, &requester, &target, true),
        Err(CoreError::DuplicatePendingSwap {
            requester_booking_id: 100,
            target_booking_id: 200
        })
    );
}

#[test]
fn pending_request_accepts_response() {
    let swap = pending_swap(100, 200);
    let requester = confirmed_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert!(validate_swap_response(&swap, &requester, &target, true).is_ok());
    assert!(validate_swap_response(&swap, &requester, &target, false).is_ok());
}

#[test]
fn resolved_request_rejects_further_responses() {
    for status in [SwapStatus::Accepted, SwapStatus::Declined, SwapStatus::Cancelled] {
        let mut swap = pending_swap(100, 200);
        swap.status = status;
        let requester = confirmed_booking(100, 10, 1, 1);
        let target = confirmed_booking(200, 20, 1, 2);

        assert_eq!(
            validate_swap_response(&swap, &requester, &target, true),
            Err(CoreError::SwapAlreadyResolved { status })
        );
    }
}

#[test]
fn acceptance_requires_both_bookings_still_confirmed() {
    let swap = pending_swap(100, 200);
    let requester = cancelled_booking(100, 10, 1, 1);
    let target = confirmed_booking(200, 20, 1, 2);

    assert_eq!(
        validate_swap_response(&swap, &requester, &target, true),
        Err(CoreError::BookingNotConfirmed { booking_id: 100 })
    );

    // Decline is still fine: no data is exchanged.
    assert!(validate_swap_response(&swap, &requester, &target, false).is_ok());
}
