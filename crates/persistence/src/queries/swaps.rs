// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Swap request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{SwapRequest, SwapStatus};
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::swap_requests;
use crate::error::PersistenceError;
use crate::timestamp::parse_optional_timestamp;

/// Diesel Queryable struct for swap request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = swap_requests)]
struct SwapRow {
    swap_id: i64,
    event_id: i64,
    requester_booking_id: i64,
    target_booking_id: i64,
    status: String,
    responded_at: Option<String>,
}

fn to_swap(row: SwapRow) -> Result<SwapRequest, PersistenceError> {
    Ok(SwapRequest {
        swap_id: Some(row.swap_id),
        event_id: row.event_id,
        requester_booking_id: row.requester_booking_id,
        target_booking_id: row.target_booking_id,
        status: SwapStatus::from_str(&row.status)
            .map_err(|e| PersistenceError::Other(e.to_string()))?,
        responded_at: parse_optional_timestamp(row.responded_at.as_deref())?,
    })
}

/// Retrieves a swap request by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `swap_id` - The swap request ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn get_swap(
    conn: &mut SqliteConnection,
    swap_id: i64,
) -> Result<Option<SwapRequest>, PersistenceError> {
    debug!("Looking up swap request by ID: {}", swap_id);

    let result: Result<SwapRow, diesel::result::Error> = swap_requests::table
        .filter(swap_requests::swap_id.eq(swap_id))
        .select(SwapRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_swap(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether the requester already has a pending swap request
/// against the target booking.
///
/// Direction matters: a counter-offer from the target back at the
/// requester is a distinct request and does not count as a duplicate.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `requester_booking_id` - The requesting booking
/// * `target_booking_id` - The targeted booking
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn has_pending_swap(
    conn: &mut SqliteConnection,
    requester_booking_id: i64,
    target_booking_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = swap_requests::table
        .filter(swap_requests::status.eq(SwapStatus::Pending.as_str()))
        .filter(swap_requests::requester_booking_id.eq(requester_booking_id))
        .filter(swap_requests::target_booking_id.eq(target_booking_id))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

/// Lists pending swap requests involving any of the given bookings.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_ids` - The bookings to match as requester or target
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pending_swaps_for_bookings(
    conn: &mut SqliteConnection,
    booking_ids: &[i64],
) -> Result<Vec<SwapRequest>, PersistenceError> {
    if booking_ids.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Listing pending swaps involving {} bookings",
        booking_ids.len()
    );

    let rows: Vec<SwapRow> = swap_requests::table
        .filter(swap_requests::status.eq(SwapStatus::Pending.as_str()))
        .filter(
            swap_requests::requester_booking_id
                .eq_any(booking_ids)
                .or(swap_requests::target_booking_id.eq_any(booking_ids)),
        )
        .order(swap_requests::swap_id.asc())
        .select(SwapRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_swap).collect()
}
