// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Waitlist mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::WaitlistEntry;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::waitlist_entries;
use crate::error::PersistenceError;

/// Inserts a waitlist entry at the position the caller computed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The entry to persist; its `waitlist_id` is ignored
///
/// # Errors
///
/// Returns an error if the insert fails, including when the position is
/// already taken within the slot.
pub fn insert_waitlist_entry(
    conn: &mut SqliteConnection,
    entry: &WaitlistEntry,
) -> Result<i64, PersistenceError> {
    info!(
        slot_id = entry.slot_id,
        position = entry.position,
        "Adding waitlist entry"
    );

    let normalized_email: String = entry.contact.email.to_lowercase();

    diesel::insert_into(waitlist_entries::table)
        .values((
            waitlist_entries::slot_id.eq(entry.slot_id),
            waitlist_entries::event_id.eq(entry.event_id),
            waitlist_entries::team_id.eq(entry.team_id),
            waitlist_entries::participant_email.eq(&normalized_email),
            waitlist_entries::participant_name.eq(entry.contact.name.as_deref()),
            waitlist_entries::participant_phone.eq(entry.contact.phone.as_deref()),
            waitlist_entries::user_id.eq(entry.user_id),
            waitlist_entries::position.eq(entry.position),
        ))
        .execute(conn)?;

    let waitlist_id: i64 = last_insert_rowid(conn)?;

    debug!(waitlist_id, "Waitlist entry created");
    Ok(waitlist_id)
}

/// Deletes a waitlist entry, normally after it has been promoted.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `waitlist_id` - The entry ID
///
/// # Errors
///
/// Returns an error if the entry does not exist or the delete fails.
pub fn delete_waitlist_entry(
    conn: &mut SqliteConnection,
    waitlist_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Deleting waitlist entry ID: {}", waitlist_id);

    let rows_affected: usize = diesel::delete(waitlist_entries::table)
        .filter(waitlist_entries::waitlist_id.eq(waitlist_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::WaitlistEntryNotFound(waitlist_id));
    }

    Ok(())
}
