// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::{DomainError, SwapStatus};

/// Errors produced by workflow decision functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain validation rule was violated.
    DomainViolation(DomainError),
    /// The slot does not belong to the stated event.
    SlotNotInEvent {
        /// The slot's identifier.
        slot_id: i64,
        /// The event the caller claimed it belongs to.
        event_id: i64,
    },
    /// The slot already holds a confirmed booking and no waitlist entry
    /// could be offered.
    SlotTaken {
        /// The contested slot.
        slot_id: i64,
    },
    /// The event does not allow slot swaps.
    SwapNotAllowed {
        /// The event with swaps disabled.
        event_id: i64,
    },
    /// A swap request named the same booking as requester and target.
    SameBookingSwap,
    /// A booking involved in a swap is not currently confirmed.
    BookingNotConfirmed {
        /// The booking that is not confirmed.
        booking_id: i64,
    },
    /// The two bookings in a swap belong to different events.
    SwapAcrossEvents {
        /// The requester booking's event.
        requester_event_id: i64,
        /// The target booking's event.
        target_event_id: i64,
    },
    /// An identical pending swap request already exists.
    DuplicatePendingSwap {
        /// The requester booking.
        requester_booking_id: i64,
        /// The target booking.
        target_booking_id: i64,
    },
    /// The swap request has already reached a terminal state.
    SwapAlreadyResolved {
        /// The request's current status.
        status: SwapStatus,
    },
    /// Bulk slot generation produced no slots for the given range.
    EmptySlotPlan,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain rule violation: {err}"),
            Self::SlotNotInEvent { slot_id, event_id } => {
                write!(f, "Slot {slot_id} does not belong to event {event_id}")
            }
            Self::SlotTaken { slot_id } => write!(f, "Slot {slot_id} is already taken"),
            Self::SwapNotAllowed { event_id } => {
                write!(f, "Event {event_id} does not allow slot swaps")
            }
            Self::SameBookingSwap => {
                write!(f, "Cannot request a swap between a booking and itself")
            }
            Self::BookingNotConfirmed { booking_id } => {
                write!(f, "Booking {booking_id} is not confirmed")
            }
            Self::SwapAcrossEvents {
                requester_event_id,
                target_event_id,
            } => {
                write!(
                    f,
                    "Cannot swap across events: requester booking is in event {requester_event_id}, target booking is in event {target_event_id}"
                )
            }
            Self::DuplicatePendingSwap {
                requester_booking_id,
                target_booking_id,
            } => {
                write!(
                    f,
                    "A pending swap request from booking {requester_booking_id} to booking {target_booking_id} already exists"
                )
            }
            Self::SwapAlreadyResolved { status } => {
                write!(f, "Swap request has already been resolved as '{status}'")
            }
            Self::EmptySlotPlan => {
                write!(f, "No slots fit the requested range and duration")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
