// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::AuditEntryData;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;
use crate::timestamp::parse_timestamp;

/// Diesel Queryable struct for audit log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_log)]
struct AuditRow {
    audit_id: i64,
    event_id: Option<i64>,
    actor_id: String,
    actor_type: String,
    action: String,
    resource_type: String,
    resource_id: Option<i64>,
    details: Option<String>,
    created_at: String,
}

fn to_entry(row: AuditRow) -> Result<AuditEntryData, PersistenceError> {
    Ok(AuditEntryData {
        audit_id: row.audit_id,
        event_id: row.event_id,
        actor_id: row.actor_id,
        actor_type: row.actor_type,
        action: row.action,
        resource_type: row.resource_type,
        resource_id: row.resource_id,
        details: row.details,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

/// Lists an event's audit entries, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn audit_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AuditEntryData>, PersistenceError> {
    debug!("Listing audit entries for event ID: {}", event_id);

    let rows: Vec<AuditRow> = audit_log::table
        .filter(audit_log::event_id.eq(event_id))
        .order(audit_log::audit_id.asc())
        .select(AuditRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_entry).collect()
}
