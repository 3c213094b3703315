// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Swap request mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{Booking, BookingStatus, SwapRequest, SwapStatus};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{bookings, swap_requests};
use crate::error::PersistenceError;
use crate::queries::bookings::get_booking;
use crate::queries::swaps::get_swap;
use crate::timestamp::format_timestamp;

/// Creates a pending swap request between two bookings.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event both bookings belong to
/// * `requester_booking_id` - The initiating booking
/// * `target_booking_id` - The booking asked to trade
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_swap_request(
    conn: &mut SqliteConnection,
    event_id: i64,
    requester_booking_id: i64,
    target_booking_id: i64,
) -> Result<i64, PersistenceError> {
    info!(
        requester_booking_id,
        target_booking_id, "Creating swap request"
    );

    diesel::insert_into(swap_requests::table)
        .values((
            swap_requests::event_id.eq(event_id),
            swap_requests::requester_booking_id.eq(requester_booking_id),
            swap_requests::target_booking_id.eq(target_booking_id),
            swap_requests::status.eq(SwapStatus::Pending.as_str()),
        ))
        .execute(conn)?;

    let swap_id: i64 = last_insert_rowid(conn)?;

    info!(swap_id, "Swap request created");
    Ok(swap_id)
}

/// Moves a pending swap request to a terminal status without touching
/// the bookings. Used for declines and withdrawals.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `swap_id` - The swap request ID
/// * `status` - The terminal status to record
/// * `responded_at` - When the response happened
///
/// # Errors
///
/// Returns `SwapNotPending` if the request was already resolved, or an
/// error if the update fails.
pub fn resolve_swap(
    conn: &mut SqliteConnection,
    swap_id: i64,
    status: SwapStatus,
    responded_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    info!(swap_id, "Resolving swap request: {}", status.as_str());

    let rows_affected: usize = diesel::update(swap_requests::table)
        .filter(swap_requests::swap_id.eq(swap_id))
        .filter(swap_requests::status.eq(SwapStatus::Pending.as_str()))
        .set((
            swap_requests::status.eq(status.as_str()),
            swap_requests::responded_at.eq(Some(format_timestamp(responded_at)?)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return if get_swap(conn, swap_id)?.is_some() {
            Err(PersistenceError::SwapNotPending { swap_id })
        } else {
            Err(PersistenceError::SwapNotFound(swap_id))
        };
    }

    Ok(())
}

/// Accepts a swap request and exchanges the two bookings' slots in a
/// single transaction.
///
/// Both bookings are revalidated inside the transaction; if either one
/// was cancelled since the request was made, nothing is exchanged.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `swap_id` - The swap request ID
/// * `responded_at` - When the acceptance happened
///
/// # Errors
///
/// Returns `SwapNotPending` if the request was already resolved,
/// `BookingNotConfirmed` if either side no longer holds its slot, or an
/// error if the transaction fails.
pub fn accept_swap(
    conn: &mut SqliteConnection,
    swap_id: i64,
    responded_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    info!(swap_id, "Accepting swap request");

    let responded_at: String = format_timestamp(responded_at)?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let swap: SwapRequest =
            get_swap(conn, swap_id)?.ok_or(PersistenceError::SwapNotFound(swap_id))?;

        if swap.status != SwapStatus::Pending {
            return Err(PersistenceError::SwapNotPending { swap_id });
        }

        let requester: Booking = get_booking(conn, swap.requester_booking_id)?
            .ok_or(PersistenceError::BookingNotFound(swap.requester_booking_id))?;
        let target: Booking = get_booking(conn, swap.target_booking_id)?
            .ok_or(PersistenceError::BookingNotFound(swap.target_booking_id))?;

        if requester.status != BookingStatus::Confirmed {
            return Err(PersistenceError::BookingNotConfirmed {
                booking_id: swap.requester_booking_id,
            });
        }
        if target.status != BookingStatus::Confirmed {
            return Err(PersistenceError::BookingNotConfirmed {
                booking_id: swap.target_booking_id,
            });
        }

        // The one-confirmed-per-slot index is checked per statement, so
        // the requester's booking vacates its slot first, the target
        // moves into it, and the requester then takes the target's slot.
        diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(swap.requester_booking_id))
            .set(bookings::status.eq(BookingStatus::Cancelled.as_str()))
            .execute(conn)?;

        diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(swap.target_booking_id))
            .set((
                bookings::slot_id.eq(requester.slot_id),
                bookings::updated_at
                    .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(swap.requester_booking_id))
            .set((
                bookings::slot_id.eq(target.slot_id),
                bookings::status.eq(BookingStatus::Confirmed.as_str()),
                bookings::updated_at
                    .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        diesel::update(swap_requests::table)
            .filter(swap_requests::swap_id.eq(swap_id))
            .set((
                swap_requests::status.eq(SwapStatus::Accepted.as_str()),
                swap_requests::responded_at.eq(Some(responded_at.as_str())),
            ))
            .execute(conn)?;

        Ok(())
    })?;

    info!(swap_id, "Swap applied");
    Ok(())
}
