// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, role, and team mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{Event, EventRole};
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{event_roles, events, teams};
use crate::error::PersistenceError;
use crate::queries::events::find_team;
use crate::timestamp::format_timestamp;

/// Creates a new event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event to persist; its `event_id` is ignored
///
/// # Errors
///
/// Returns an error if the event cannot be created or the slug is taken.
pub fn create_event(conn: &mut SqliteConnection, event: &Event) -> Result<i64, PersistenceError> {
    info!("Creating event with slug: {}", event.slug);

    let starts_at: String = format_timestamp(event.starts_at)?;
    let ends_at: Option<String> = event.ends_at.map(format_timestamp).transpose()?;

    diesel::insert_into(events::table)
        .values((
            events::title.eq(&event.title),
            events::description.eq(event.description.as_deref()),
            events::slug.eq(&event.slug),
            events::starts_at.eq(&starts_at),
            events::ends_at.eq(ends_at.as_deref()),
            events::timezone.eq(&event.timezone),
            events::show_contact.eq(i32::from(event.show_contact)),
            events::allow_swap.eq(i32::from(event.allow_swap)),
            events::allow_waitlist.eq(i32::from(event.allow_waitlist)),
            events::max_signups_per_participant.eq(event.max_signups_per_participant),
            events::notify_email.eq(event.notify_email.as_deref()),
            events::created_by.eq(event.created_by),
        ))
        .execute(conn)?;

    let event_id: i64 = last_insert_rowid(conn)?;

    info!(event_id, "Event created");
    Ok(event_id)
}

/// Updates an existing event's settings.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event to update; `event_id` must be set
///
/// # Errors
///
/// Returns an error if the event has no ID or does not exist.
pub fn update_event(conn: &mut SqliteConnection, event: &Event) -> Result<(), PersistenceError> {
    let event_id: i64 = event
        .event_id
        .ok_or_else(|| PersistenceError::Other("Cannot update an unpersisted event".to_string()))?;

    info!("Updating event ID: {}", event_id);

    let starts_at: String = format_timestamp(event.starts_at)?;
    let ends_at: Option<String> = event.ends_at.map(format_timestamp).transpose()?;

    let rows_affected: usize = diesel::update(events::table)
        .filter(events::event_id.eq(event_id))
        .set((
            events::title.eq(&event.title),
            events::description.eq(event.description.as_deref()),
            events::slug.eq(&event.slug),
            events::starts_at.eq(&starts_at),
            events::ends_at.eq(ends_at.as_deref()),
            events::timezone.eq(&event.timezone),
            events::show_contact.eq(i32::from(event.show_contact)),
            events::allow_swap.eq(i32::from(event.allow_swap)),
            events::allow_waitlist.eq(i32::from(event.allow_waitlist)),
            events::max_signups_per_participant.eq(event.max_signups_per_participant),
            events::notify_email.eq(event.notify_email.as_deref()),
            events::updated_at
                .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    Ok(())
}

/// Grants a role on an event, replacing any existing role for the
/// participant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
/// * `participant_id` - The participant ID
/// * `role` - The role to grant
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn grant_event_role(
    conn: &mut SqliteConnection,
    event_id: i64,
    participant_id: i64,
    role: EventRole,
) -> Result<(), PersistenceError> {
    info!(
        event_id,
        participant_id,
        "Granting event role: {}",
        role.as_str()
    );

    diesel::insert_into(event_roles::table)
        .values((
            event_roles::event_id.eq(event_id),
            event_roles::participant_id.eq(participant_id),
            event_roles::role.eq(role.as_str()),
        ))
        .on_conflict((event_roles::event_id, event_roles::participant_id))
        .do_update()
        .set(event_roles::role.eq(role.as_str()))
        .execute(conn)?;

    Ok(())
}

/// Finds a team by name within an event, creating it if absent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event the team belongs to
/// * `name` - The team name (unique per event)
/// * `contact_email` - Optional contact email, applied only on creation
/// * `contact_phone` - Optional contact phone, applied only on creation
///
/// # Errors
///
/// Returns an error if the database read or write fails.
pub fn find_or_create_team(
    conn: &mut SqliteConnection,
    event_id: i64,
    name: &str,
    contact_email: Option<&str>,
    contact_phone: Option<&str>,
) -> Result<i64, PersistenceError> {
    if let Some(team) = find_team(conn, event_id, name)? {
        if let Some(team_id) = team.team_id {
            debug!(team_id, "Reusing existing team");
            return Ok(team_id);
        }
    }

    info!(event_id, "Creating team: {}", name);

    diesel::insert_into(teams::table)
        .values((
            teams::event_id.eq(event_id),
            teams::name.eq(name),
            teams::contact_email.eq(contact_email),
            teams::contact_phone.eq(contact_phone),
        ))
        .execute(conn)?;

    let team_id: i64 = last_insert_rowid(conn)?;

    info!(team_id, "Team created");
    Ok(team_id)
}
