// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Waitlist queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{ContactInfo, WaitlistEntry};
use tracing::debug;

use crate::diesel_schema::waitlist_entries;
use crate::error::PersistenceError;

/// Diesel Queryable struct for waitlist rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = waitlist_entries)]
struct WaitlistRow {
    waitlist_id: i64,
    slot_id: i64,
    event_id: i64,
    team_id: Option<i64>,
    participant_email: String,
    participant_name: Option<String>,
    participant_phone: Option<String>,
    user_id: Option<i64>,
    position: i64,
}

fn to_entry(row: WaitlistRow) -> WaitlistEntry {
    WaitlistEntry {
        waitlist_id: Some(row.waitlist_id),
        slot_id: row.slot_id,
        event_id: row.event_id,
        team_id: row.team_id,
        contact: ContactInfo {
            email: row.participant_email,
            name: row.participant_name,
            phone: row.participant_phone,
        },
        user_id: row.user_id,
        position: row.position,
    }
}

/// Retrieves a waitlist entry by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `waitlist_id` - The entry ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the entry is not found.
pub fn get_waitlist_entry(
    conn: &mut SqliteConnection,
    waitlist_id: i64,
) -> Result<Option<WaitlistEntry>, PersistenceError> {
    debug!("Looking up waitlist entry by ID: {}", waitlist_id);

    let result: Result<WaitlistRow, diesel::result::Error> = waitlist_entries::table
        .filter(waitlist_entries::waitlist_id.eq(waitlist_id))
        .select(WaitlistRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_entry(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Returns the highest position on a slot's waitlist.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the waitlist is empty.
pub fn max_waitlist_position(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let max: Option<i64> = waitlist_entries::table
        .filter(waitlist_entries::slot_id.eq(slot_id))
        .select(diesel::dsl::max(waitlist_entries::position))
        .first(conn)?;

    Ok(max)
}

/// Lists a slot's waitlist in promotion order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn waitlist_for_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Vec<WaitlistEntry>, PersistenceError> {
    debug!("Listing waitlist for slot ID: {}", slot_id);

    let rows: Vec<WaitlistRow> = waitlist_entries::table
        .filter(waitlist_entries::slot_id.eq(slot_id))
        .order(waitlist_entries::position.asc())
        .select(WaitlistRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(to_entry).collect())
}

/// Lists every waitlist entry across an event's slots.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn waitlist_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<WaitlistEntry>, PersistenceError> {
    debug!("Listing waitlist for event ID: {}", event_id);

    let rows: Vec<WaitlistRow> = waitlist_entries::table
        .filter(waitlist_entries::event_id.eq(event_id))
        .order((
            waitlist_entries::slot_id.asc(),
            waitlist_entries::position.asc(),
        ))
        .select(WaitlistRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(to_entry).collect())
}
