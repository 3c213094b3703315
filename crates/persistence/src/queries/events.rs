// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, role, and team queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_domain::{Event, EventRole, Team};
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::{event_roles, events, teams};
use crate::error::PersistenceError;
use crate::timestamp::{parse_optional_timestamp, parse_timestamp};

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    title: String,
    description: Option<String>,
    slug: String,
    starts_at: String,
    ends_at: Option<String>,
    timezone: String,
    show_contact: i32,
    allow_swap: i32,
    allow_waitlist: i32,
    max_signups_per_participant: i64,
    notify_email: Option<String>,
    created_by: i64,
}

/// Diesel Queryable struct for team rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teams)]
struct TeamRow {
    team_id: i64,
    event_id: i64,
    name: String,
    contact_email: Option<String>,
    contact_phone: Option<String>,
}

fn to_event(row: EventRow) -> Result<Event, PersistenceError> {
    Ok(Event {
        event_id: Some(row.event_id),
        title: row.title,
        description: row.description,
        slug: row.slug,
        starts_at: parse_timestamp(&row.starts_at)?,
        ends_at: parse_optional_timestamp(row.ends_at.as_deref())?,
        timezone: row.timezone,
        show_contact: row.show_contact != 0,
        allow_swap: row.allow_swap != 0,
        allow_waitlist: row.allow_waitlist != 0,
        max_signups_per_participant: row.max_signups_per_participant,
        notify_email: row.notify_email,
        created_by: row.created_by,
    })
}

fn to_team(row: TeamRow) -> Team {
    Team {
        team_id: Some(row.team_id),
        event_id: row.event_id,
        name: row.name,
        contact_email: row.contact_email,
        contact_phone: row.contact_phone,
    }
}

/// Retrieves an event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<Event>, PersistenceError> {
    debug!("Looking up event by ID: {}", event_id);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_event(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an event by slug.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slug` - The slug from the shared link
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no event has the slug.
pub fn get_event_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<Event>, PersistenceError> {
    debug!("Looking up event by slug: {}", slug);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::slug.eq(slug))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_event(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all events, newest start first.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<Event>, PersistenceError> {
    debug!("Listing all events");

    let rows: Vec<EventRow> = events::table
        .order(events::starts_at.desc())
        .select(EventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(to_event).collect()
}

/// Retrieves a participant's role on an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
/// * `participant_id` - The participant ID
///
/// # Errors
///
/// Returns an error if the database query fails or the stored role is
/// unrecognized. Returns `Ok(None)` if no role was granted.
pub fn get_event_role(
    conn: &mut SqliteConnection,
    event_id: i64,
    participant_id: i64,
) -> Result<Option<EventRole>, PersistenceError> {
    debug!(event_id, participant_id, "Looking up event role");

    let result: Result<String, diesel::result::Error> = event_roles::table
        .filter(event_roles::event_id.eq(event_id))
        .filter(event_roles::participant_id.eq(participant_id))
        .select(event_roles::role)
        .first(conn);

    match result {
        Ok(role) => Ok(Some(
            EventRole::from_str(&role).map_err(|e| PersistenceError::Other(e.to_string()))?,
        )),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a team by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the team is not found.
pub fn get_team(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<Team>, PersistenceError> {
    debug!("Looking up team by ID: {}", team_id);

    let result: Result<TeamRow, diesel::result::Error> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_team(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Finds a team by name within an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID
/// * `name` - The team name
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no team has the name.
pub fn find_team(
    conn: &mut SqliteConnection,
    event_id: i64,
    name: &str,
) -> Result<Option<Team>, PersistenceError> {
    debug!(event_id, "Looking up team by name: {}", name);

    let result: Result<TeamRow, diesel::result::Error> = teams::table
        .filter(teams::event_id.eq(event_id))
        .filter(teams::name.eq(name))
        .select(TeamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_team(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
