// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reminder bookkeeping mutations.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use slotbook_core::ReminderKind;
use time::OffsetDateTime;
use tracing::debug;

use crate::diesel_schema::reminders_sent;
use crate::error::PersistenceError;
use crate::timestamp::format_timestamp;

/// Records that a reminder was sent for a booking.
///
/// The `(booking_id, reminder_type)` uniqueness constraint is the
/// de-duplication guard: a second record attempt for the same pair
/// returns `false` and the caller skips the send.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking the reminder targets
/// * `kind` - The reminder window
/// * `sent_at` - When the reminder was recorded
///
/// # Errors
///
/// Returns an error if the insert fails for any reason other than the
/// pair already existing.
pub fn record_reminder_sent(
    conn: &mut SqliteConnection,
    booking_id: i64,
    kind: ReminderKind,
    sent_at: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let result = diesel::insert_into(reminders_sent::table)
        .values((
            reminders_sent::booking_id.eq(booking_id),
            reminders_sent::reminder_type.eq(kind.as_str()),
            reminders_sent::sent_at.eq(format_timestamp(sent_at)?),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            debug!(booking_id, kind = kind.as_str(), "Reminder recorded");
            Ok(true)
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            debug!(booking_id, kind = kind.as_str(), "Reminder already sent");
            Ok(false)
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
