// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signup verification mutations.
//!
//! A signup is a two-step flow: a request creates a single-use token,
//! and confirming the token books the slot (or joins the waitlist) and
//! consumes the token, all in one transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slotbook_core::{CoreError, SignupResolution, resolve_signup};
use slotbook_domain::{Booking, ContactInfo, Event, Slot, WaitlistEntry};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::{NewVerification, VerificationData};
use crate::diesel_schema::signup_verifications;
use crate::error::PersistenceError;
use crate::mutations::bookings::insert_confirmed_booking;
use crate::mutations::events::find_or_create_team;
use crate::mutations::waitlist::insert_waitlist_entry;
use crate::queries::bookings::confirmed_booking_for_slot;
use crate::queries::events::get_event;
use crate::queries::slots::get_slot;
use crate::queries::verifications::find_valid_verification;
use crate::queries::waitlist::max_waitlist_position;
use crate::timestamp::format_timestamp;

/// Outcome of completing a signup verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletedSignup {
    /// The slot was free; a confirmed booking was created.
    Booked {
        /// The new booking's ID.
        booking_id: i64,
    },
    /// The slot was taken; a waitlist entry was created instead.
    Waitlisted {
        /// The new entry's ID.
        waitlist_id: i64,
        /// The entry's FIFO position.
        position: i64,
    },
}

/// Creates a signup verification token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `verification` - The verification to persist
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_verification(
    conn: &mut SqliteConnection,
    verification: &NewVerification,
) -> Result<i64, PersistenceError> {
    info!(
        event_id = verification.event_id,
        slot_id = verification.slot_id,
        "Creating signup verification"
    );

    let normalized_email: String = verification.participant_email.to_lowercase();

    diesel::insert_into(signup_verifications::table)
        .values((
            signup_verifications::token.eq(&verification.token),
            signup_verifications::event_id.eq(verification.event_id),
            signup_verifications::slot_id.eq(verification.slot_id),
            signup_verifications::participant_email.eq(&normalized_email),
            signup_verifications::participant_name.eq(verification.participant_name.as_deref()),
            signup_verifications::participant_phone.eq(verification.participant_phone.as_deref()),
            signup_verifications::team_name.eq(verification.team_name.as_deref()),
            signup_verifications::user_id.eq(verification.user_id),
            signup_verifications::join_waitlist.eq(i32::from(verification.join_waitlist)),
            signup_verifications::expires_at.eq(format_timestamp(verification.expires_at)?),
        ))
        .execute(conn)?;

    let verification_id: i64 = last_insert_rowid(conn)?;

    info!(verification_id, "Verification created");
    Ok(verification_id)
}

/// Completes a signup by consuming a verification token.
///
/// Inside one transaction: the token is revalidated, the slot's
/// occupancy is checked, the booking or waitlist entry is created, and
/// the token is marked consumed. A token that is unknown, expired, or
/// already consumed fails with `VerificationInvalid`.
///
/// A booking insert that loses to a concurrent signup on another
/// connection is re-resolved with the slot treated as taken, so an
/// opted-in signer still lands on the waitlist instead of erroring.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The single-use token from the confirmation link
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `VerificationInvalid` for bad tokens,
/// `ConfirmedBookingExists` if the slot is taken and the signer did not
/// opt into the waitlist, or an error if the transaction fails.
pub fn complete_verification(
    conn: &mut SqliteConnection,
    token: &str,
    now: OffsetDateTime,
) -> Result<CompletedSignup, PersistenceError> {
    info!("Completing signup verification");

    conn.transaction::<CompletedSignup, PersistenceError, _>(|conn| {
        let verification: VerificationData = find_valid_verification(conn, token, now)?
            .ok_or(PersistenceError::VerificationInvalid)?;

        let event: Event = get_event(conn, verification.event_id)?
            .ok_or(PersistenceError::EventNotFound(verification.event_id))?;
        let slot: Slot = get_slot(conn, verification.slot_id)?
            .ok_or(PersistenceError::SlotNotFound(verification.slot_id))?;

        let slot_taken: bool = confirmed_booking_for_slot(conn, verification.slot_id)?.is_some();
        let max_position: Option<i64> = max_waitlist_position(conn, verification.slot_id)?;

        let resolution: SignupResolution = resolve_completion(
            &slot,
            &event,
            slot_taken,
            verification.join_waitlist,
            max_position,
        )?;

        let team_id: Option<i64> = match verification.team_name.as_deref() {
            Some(name) => Some(find_or_create_team(
                conn,
                verification.event_id,
                name,
                Some(&verification.participant_email),
                verification.participant_phone.as_deref(),
            )?),
            None => None,
        };

        let contact: ContactInfo = ContactInfo {
            email: verification.participant_email.clone(),
            name: verification.participant_name.clone(),
            phone: verification.participant_phone.clone(),
        };

        let outcome: CompletedSignup = match resolution {
            SignupResolution::Confirm => {
                let mut booking: Booking =
                    Booking::new(verification.slot_id, verification.event_id, contact.clone());
                booking.team_id = team_id;
                booking.user_id = verification.user_id;

                match insert_confirmed_booking(conn, &booking) {
                    Ok(booking_id) => CompletedSignup::Booked { booking_id },
                    Err(PersistenceError::ConfirmedBookingExists { .. }) => {
                        // Another connection claimed the slot between the
                        // occupancy check and the insert. Treat the slot as
                        // taken and fall through to the waitlist path.
                        waitlist_after_lost_insert(
                            conn,
                            &event,
                            &slot,
                            &verification,
                            team_id,
                            contact,
                        )?
                    }
                    Err(other) => return Err(other),
                }
            }
            SignupResolution::Waitlist { position } => {
                queue_entry(conn, &verification, team_id, contact, position)?
            }
        };

        diesel::update(signup_verifications::table)
            .filter(signup_verifications::verification_id.eq(verification.verification_id))
            .set(signup_verifications::consumed_at.eq(Some(format_timestamp(now)?)))
            .execute(conn)?;

        Ok(outcome)
    })
}

/// Runs the signup decision, translating a taken slot into the
/// persistence-level conflict error.
fn resolve_completion(
    slot: &Slot,
    event: &Event,
    slot_taken: bool,
    join_waitlist: bool,
    max_position: Option<i64>,
) -> Result<SignupResolution, PersistenceError> {
    resolve_signup(slot, event, slot_taken, join_waitlist, max_position).map_err(|e| match e {
        CoreError::SlotTaken { slot_id } => PersistenceError::ConfirmedBookingExists { slot_id },
        other => PersistenceError::from(other),
    })
}

/// Re-resolves a signup after a confirmed-booking insert lost to a
/// concurrent signup on another connection.
///
/// The slot is now known to be taken, so the only outcomes are a
/// waitlist entry (signer opted in, event allows it) or
/// `ConfirmedBookingExists`.
///
/// # Errors
///
/// Returns `ConfirmedBookingExists` when the waitlist is not available
/// to the signer, or an error if the fallback insert fails.
pub(crate) fn waitlist_after_lost_insert(
    conn: &mut SqliteConnection,
    event: &Event,
    slot: &Slot,
    verification: &VerificationData,
    team_id: Option<i64>,
    contact: ContactInfo,
) -> Result<CompletedSignup, PersistenceError> {
    let max_position: Option<i64> = max_waitlist_position(conn, verification.slot_id)?;
    match resolve_completion(slot, event, true, verification.join_waitlist, max_position)? {
        SignupResolution::Waitlist { position } => {
            queue_entry(conn, verification, team_id, contact, position)
        }
        SignupResolution::Confirm => Err(PersistenceError::ConfirmedBookingExists {
            slot_id: verification.slot_id,
        }),
    }
}

fn queue_entry(
    conn: &mut SqliteConnection,
    verification: &VerificationData,
    team_id: Option<i64>,
    contact: ContactInfo,
    position: i64,
) -> Result<CompletedSignup, PersistenceError> {
    let entry: WaitlistEntry = WaitlistEntry {
        waitlist_id: None,
        slot_id: verification.slot_id,
        event_id: verification.event_id,
        team_id,
        contact,
        user_id: verification.user_id,
        position,
    };

    let waitlist_id: i64 = insert_waitlist_entry(conn, &entry)?;
    Ok(CompletedSignup::Waitlisted {
        waitlist_id,
        position,
    })
}
