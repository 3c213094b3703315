// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{Booking, BookingStatus, ContactInfo};
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    slot_id: i64,
    event_id: i64,
    team_id: Option<i64>,
    participant_email: String,
    participant_name: Option<String>,
    participant_phone: Option<String>,
    user_id: Option<i64>,
    status: String,
}

fn to_booking(row: BookingRow) -> Result<Booking, PersistenceError> {
    Ok(Booking {
        booking_id: Some(row.booking_id),
        slot_id: row.slot_id,
        event_id: row.event_id,
        team_id: row.team_id,
        contact: ContactInfo {
            email: row.participant_email,
            name: row.participant_name,
            phone: row.participant_phone,
        },
        user_id: row.user_id,
        status: BookingStatus::from_str(&row.status)
            .map_err(|e| PersistenceError::Other(e.to_string()))?,
    })
}

/// Retrieves a booking by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    debug!("Looking up booking by ID: {}", booking_id);

    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_booking(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the confirmed booking holding a slot, if any.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the slot is free.
pub fn confirmed_booking_for_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    debug!("Looking up confirmed booking for slot ID: {}", slot_id);

    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::slot_id.eq(slot_id))
        .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_booking(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every booking for an event, regardless of status.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    debug!("Listing bookings for event ID: {}", event_id);

    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::event_id.eq(event_id))
        .order(bookings::booking_id.asc())
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_booking).collect()
}

/// Lists the confirmed bookings holding any of the given slots.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_ids` - The slots to look up
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn confirmed_bookings_for_slots(
    conn: &mut SqliteConnection,
    slot_ids: &[i64],
) -> Result<Vec<Booking>, PersistenceError> {
    if slot_ids.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Listing confirmed bookings for {} slots", slot_ids.len());

    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::slot_id.eq_any(slot_ids))
        .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_booking).collect()
}

/// Counts a participant's confirmed bookings within an event, matched
/// by email.
///
/// Used to enforce the event's per-participant signup cap.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
/// * `email` - The participant email
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_confirmed_bookings_for_email(
    conn: &mut SqliteConnection,
    event_id: i64,
    email: &str,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.to_lowercase();

    let count: i64 = bookings::table
        .filter(bookings::event_id.eq(event_id))
        .filter(bookings::participant_email.eq(&normalized_email))
        .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
        .count()
        .get_result(conn)?;

    Ok(count)
}
