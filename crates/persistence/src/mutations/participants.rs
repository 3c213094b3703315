// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant account and session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{participants, sessions};
use crate::error::PersistenceError;
use crate::timestamp::format_timestamp;

/// Creates a new participant account.
///
/// The email is normalized to lowercase for case-insensitive uniqueness.
/// The password hash is produced by the caller; this layer never sees
/// plain-text passwords.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The account email (will be normalized)
/// * `password_hash` - The bcrypt hash of the account password
/// * `display_name` - Optional display name
///
/// # Errors
///
/// Returns an error if the account cannot be created or the email is
/// already registered.
pub fn create_participant(
    conn: &mut SqliteConnection,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.to_lowercase();

    info!("Creating participant account for: {}", normalized_email);

    diesel::insert_into(participants::table)
        .values((
            participants::email.eq(&normalized_email),
            participants::password_hash.eq(password_hash),
            participants::display_name.eq(display_name),
        ))
        .execute(conn)?;

    let participant_id: i64 = last_insert_rowid(conn)?;

    info!(participant_id, "Participant account created");
    Ok(participant_id)
}

/// Creates a new session for a participant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `participant_id` - The participant ID
/// * `expires_at` - When the session expires
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    participant_id: i64,
    expires_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    debug!("Creating session for participant ID: {}", participant_id);

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::participant_id.eq(participant_id),
            sessions::expires_at.eq(format_timestamp(expires_at)?),
        ))
        .execute(conn)?;

    let session_id: i64 = last_insert_rowid(conn)?;

    debug!(session_id, participant_id, "Session created");
    Ok(session_id)
}

/// Deletes a session by token.
///
/// This is used for logout operations.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all sessions that expired before `now`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The cutoff instant
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(format_timestamp(now)?))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
