// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::Slot;
use time::OffsetDateTime;
use tracing::debug;

use crate::diesel_schema::slots;
use crate::error::PersistenceError;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Diesel Queryable struct for slot rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = slots)]
struct SlotRow {
    slot_id: i64,
    event_id: i64,
    starts_at: String,
    ends_at: String,
    label: Option<String>,
    sort_order: i64,
}

fn to_slot(row: SlotRow) -> Result<Slot, PersistenceError> {
    Ok(Slot {
        slot_id: Some(row.slot_id),
        event_id: row.event_id,
        starts_at: parse_timestamp(&row.starts_at)?,
        ends_at: parse_timestamp(&row.ends_at)?,
        label: row.label,
        sort_order: row.sort_order,
    })
}

/// Retrieves a slot by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the slot is not found.
pub fn get_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Option<Slot>, PersistenceError> {
    debug!("Looking up slot by ID: {}", slot_id);

    let result: Result<SlotRow, diesel::result::Error> = slots::table
        .filter(slots::slot_id.eq(slot_id))
        .select(SlotRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_slot(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists an event's slots in organizer-defined order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_slots_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Slot>, PersistenceError> {
    debug!("Listing slots for event ID: {}", event_id);

    let rows: Vec<SlotRow> = slots::table
        .filter(slots::event_id.eq(event_id))
        .order((slots::sort_order.asc(), slots::starts_at.asc()))
        .select(SlotRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_slot).collect()
}

/// Returns the highest `sort_order` among an event's slots.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event has no slots.
pub fn max_sort_order(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let max: Option<i64> = slots::table
        .filter(slots::event_id.eq(event_id))
        .select(diesel::dsl::max(slots::sort_order))
        .first(conn)?;

    Ok(max)
}

/// Lists slots starting within a half-open time window, across all
/// events. Used by the reminder sweep.
///
/// Stored timestamps are normalized RFC 3339 UTC, so the range filter
/// compares correctly as text.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `from` - Window start (inclusive)
/// * `to` - Window end (exclusive)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn slots_starting_between(
    conn: &mut SqliteConnection,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> Result<Vec<Slot>, PersistenceError> {
    let from_text: String = format_timestamp(from)?;
    let to_text: String = format_timestamp(to)?;

    debug!("Listing slots starting in [{}, {})", from_text, to_text);

    let rows: Vec<SlotRow> = slots::table
        .filter(slots::starts_at.ge(&from_text))
        .filter(slots::starts_at.lt(&to_text))
        .order(slots::starts_at.asc())
        .select(SlotRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_slot).collect()
}
