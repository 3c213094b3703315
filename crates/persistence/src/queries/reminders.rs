// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reminder bookkeeping queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_core::ReminderKind;

use crate::diesel_schema::reminders_sent;
use crate::error::PersistenceError;

/// Checks whether a reminder of the given kind was already sent for a
/// booking.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking ID
/// * `kind` - The reminder window
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn reminder_sent(
    conn: &mut SqliteConnection,
    booking_id: i64,
    kind: ReminderKind,
) -> Result<bool, PersistenceError> {
    let count: i64 = reminders_sent::table
        .filter(reminders_sent::booking_id.eq(booking_id))
        .filter(reminders_sent::reminder_type.eq(kind.as_str()))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
