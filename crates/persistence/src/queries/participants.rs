// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant account and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{ParticipantData, SessionData};
use crate::diesel_schema::{participants, sessions};
use crate::error::PersistenceError;
use crate::timestamp::parse_timestamp;

/// Diesel Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
struct ParticipantRow {
    participant_id: i64,
    email: String,
    password_hash: String,
    display_name: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    participant_id: i64,
    expires_at: String,
}

fn to_participant(row: ParticipantRow) -> ParticipantData {
    ParticipantData {
        participant_id: row.participant_id,
        email: row.email,
        password_hash: row.password_hash,
        display_name: row.display_name,
    }
}

/// Retrieves a participant by email.
///
/// The email is normalized to lowercase for case-insensitive lookup.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account exists.
pub fn get_participant_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<ParticipantData>, PersistenceError> {
    let normalized_email: String = email.to_lowercase();

    debug!("Looking up participant by email: {}", normalized_email);

    let result: Result<ParticipantRow, diesel::result::Error> = participants::table
        .filter(participants::email.eq(&normalized_email))
        .select(ParticipantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_participant(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a participant by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The participant ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account exists.
pub fn get_participant_by_id(
    conn: &mut SqliteConnection,
    participant_id: i64,
) -> Result<Option<ParticipantData>, PersistenceError> {
    debug!("Looking up participant by ID: {}", participant_id);

    let result: Result<ParticipantRow, diesel::result::Error> = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_participant(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            participant_id: row.participant_id,
            expires_at: parse_timestamp(&row.expires_at)?,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
