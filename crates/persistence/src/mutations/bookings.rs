// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use slotbook_domain::{Booking, BookingStatus};
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Inserts a confirmed booking.
///
/// The partial unique index on confirmed bookings is the arbiter here:
/// if another confirmed booking already holds the slot, the insert loses
/// and `ConfirmedBookingExists` is returned.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking` - The booking to persist; its `booking_id` is ignored
///
/// # Errors
///
/// Returns `ConfirmedBookingExists` if the slot is already held, or an
/// error if the insert fails.
pub fn insert_confirmed_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<i64, PersistenceError> {
    info!(slot_id = booking.slot_id, "Inserting confirmed booking");

    // Emails are stored lowercase so per-participant counts match.
    let normalized_email: String = booking.contact.email.to_lowercase();

    let result = diesel::insert_into(bookings::table)
        .values((
            bookings::slot_id.eq(booking.slot_id),
            bookings::event_id.eq(booking.event_id),
            bookings::team_id.eq(booking.team_id),
            bookings::participant_email.eq(&normalized_email),
            bookings::participant_name.eq(booking.contact.name.as_deref()),
            bookings::participant_phone.eq(booking.contact.phone.as_deref()),
            bookings::user_id.eq(booking.user_id),
            bookings::status.eq(BookingStatus::Confirmed.as_str()),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            let booking_id: i64 = last_insert_rowid(conn)?;
            info!(booking_id, "Booking created");
            Ok(booking_id)
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::ConfirmedBookingExists {
                slot_id: booking.slot_id,
            })
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Updates a booking's lifecycle status.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking ID
/// * `status` - The new status
///
/// # Errors
///
/// Returns an error if the booking does not exist or the update fails.
pub fn set_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    status: BookingStatus,
) -> Result<(), PersistenceError> {
    info!(booking_id, "Setting booking status: {}", status.as_str());

    let rows_affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .set((
            bookings::status.eq(status.as_str()),
            bookings::updated_at
                .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    Ok(())
}
