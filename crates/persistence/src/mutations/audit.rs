// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log mutations.
//!
//! The audit log is append-only; there are no update or delete paths.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_audit::AuditRecord;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;
use crate::timestamp::format_timestamp;

/// Appends an audit record.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `record` - The record to append
/// * `recorded_at` - When the action happened
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn record_audit(
    conn: &mut SqliteConnection,
    record: &AuditRecord,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    debug!(
        action = record.action.name(),
        resource_type = %record.resource_type,
        "Appending audit record"
    );

    diesel::insert_into(audit_log::table)
        .values((
            audit_log::event_id.eq(record.event_id),
            audit_log::actor_id.eq(record.actor.id()),
            audit_log::actor_type.eq(record.actor.actor_type()),
            audit_log::action.eq(record.action.name()),
            audit_log::resource_type.eq(&record.resource_type),
            audit_log::resource_id.eq(record.resource_id),
            audit_log::details.eq(record.action.details()),
            audit_log::created_at.eq(format_timestamp(recorded_at)?),
        ))
        .execute(conn)?;

    let audit_id: i64 = last_insert_rowid(conn)?;

    debug!(audit_id, "Audit record appended");
    Ok(audit_id)
}
