// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signup verification queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::VerificationData;
use crate::diesel_schema::signup_verifications;
use crate::error::PersistenceError;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Diesel Queryable struct for verification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = signup_verifications)]
struct VerificationRow {
    verification_id: i64,
    token: String,
    event_id: i64,
    slot_id: i64,
    participant_email: String,
    participant_name: Option<String>,
    participant_phone: Option<String>,
    team_name: Option<String>,
    user_id: Option<i64>,
    join_waitlist: i32,
    expires_at: String,
}

/// Retrieves a verification by token, provided it is unconsumed and
/// unexpired at `now`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The single-use token
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` for unknown, consumed, or expired tokens.
pub fn find_valid_verification(
    conn: &mut SqliteConnection,
    token: &str,
    now: OffsetDateTime,
) -> Result<Option<VerificationData>, PersistenceError> {
    debug!("Looking up signup verification by token");

    let now_text: String = format_timestamp(now)?;

    let result: Result<VerificationRow, diesel::result::Error> = signup_verifications::table
        .filter(signup_verifications::token.eq(token))
        .filter(signup_verifications::consumed_at.is_null())
        .filter(signup_verifications::expires_at.gt(&now_text))
        .select(VerificationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(VerificationData {
            verification_id: row.verification_id,
            token: row.token,
            event_id: row.event_id,
            slot_id: row.slot_id,
            participant_email: row.participant_email,
            participant_name: row.participant_name,
            participant_phone: row.participant_phone,
            team_name: row.team_name,
            user_id: row.user_id,
            join_waitlist: row.join_waitlist != 0,
            expires_at: parse_timestamp(&row.expires_at)?,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
