// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot mutations.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use slotbook_core::PlannedSlot;
use slotbook_domain::Slot;
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::slots;
use crate::error::PersistenceError;
use crate::timestamp::format_timestamp;

fn insert_slot(
    conn: &mut SqliteConnection,
    event_id: i64,
    starts_at: &str,
    ends_at: &str,
    label: Option<&str>,
    sort_order: i64,
) -> Result<i64, PersistenceError> {
    let result = diesel::insert_into(slots::table)
        .values((
            slots::event_id.eq(event_id),
            slots::starts_at.eq(starts_at),
            slots::ends_at.eq(ends_at),
            slots::label.eq(label),
            slots::sort_order.eq(sort_order),
        ))
        .execute(conn);

    match result {
        Ok(_) => last_insert_rowid(conn),
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::DuplicateSlotStart { event_id })
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Creates a single slot.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot` - The slot to persist; its `slot_id` is ignored
///
/// # Errors
///
/// Returns `DuplicateSlotStart` if another slot in the event already
/// starts at the same time, or an error if the insert fails.
pub fn create_slot(conn: &mut SqliteConnection, slot: &Slot) -> Result<i64, PersistenceError> {
    info!(event_id = slot.event_id, "Creating slot");

    let starts_at: String = format_timestamp(slot.starts_at)?;
    let ends_at: String = format_timestamp(slot.ends_at)?;

    let slot_id: i64 = insert_slot(
        conn,
        slot.event_id,
        &starts_at,
        &ends_at,
        slot.label.as_deref(),
        slot.sort_order,
    )?;

    info!(slot_id, "Slot created");
    Ok(slot_id)
}

/// Creates a batch of planned slots atomically.
///
/// Either every slot in the plan is created or none are.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event the slots belong to
/// * `planned` - The slot plan to persist
///
/// # Errors
///
/// Returns `DuplicateSlotStart` if any planned slot collides with an
/// existing start time, or an error if the transaction fails.
pub fn create_slots(
    conn: &mut SqliteConnection,
    event_id: i64,
    planned: &[PlannedSlot],
) -> Result<Vec<i64>, PersistenceError> {
    info!(event_id, "Creating {} slots", planned.len());

    conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
        let mut slot_ids: Vec<i64> = Vec::with_capacity(planned.len());

        for slot in planned {
            let starts_at: String = format_timestamp(slot.starts_at)?;
            let ends_at: String = format_timestamp(slot.ends_at)?;

            let slot_id: i64 = insert_slot(
                conn,
                event_id,
                &starts_at,
                &ends_at,
                slot.label.as_deref(),
                slot.sort_order,
            )?;
            slot_ids.push(slot_id);
        }

        Ok(slot_ids)
    })
}

/// Deletes a slot.
///
/// Bookings, waitlist entries, and verifications referencing the slot
/// are removed by cascade. Callers cancel and notify affected bookings
/// first; the audit log is what survives the delete.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the slot does not exist or the delete fails.
pub fn delete_slot(conn: &mut SqliteConnection, slot_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting slot ID: {}", slot_id);

    let rows_affected: usize = diesel::delete(slots::table)
        .filter(slots::slot_id.eq(slot_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SlotNotFound(slot_id));
    }

    Ok(())
}
