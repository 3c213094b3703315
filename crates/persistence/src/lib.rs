// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Slotbook booking system.
//!
//! This crate stores events, slots, bookings, waitlists, swap requests,
//! signup verifications, reminder bookkeeping, and the audit log. It is
//! built on Diesel over `SQLite`.
//!
//! ## Consistency model
//!
//! The store is the sole arbiter of slot occupancy. A partial unique
//! index allows at most one confirmed booking per slot; signup inserts
//! race on that index and losers surface as
//! [`PersistenceError::ConfirmedBookingExists`]. Multi-step operations
//! (swap acceptance, verification completion, bulk slot creation) run
//! inside `SQLite` transactions.
//!
//! ## Testing
//!
//! Tests run against per-test shared in-memory databases, named by an
//! atomic counter so parallel tests never collide.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use slotbook_audit::AuditRecord;
use slotbook_core::{PlannedSlot, ReminderKind};
use slotbook_domain::{
    Booking, BookingStatus, Event, EventRole, Slot, SwapRequest, SwapStatus, Team, WaitlistEntry,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod timestamp;

#[cfg(test)]
mod tests;

pub use data_models::{AuditEntryData, NewVerification, ParticipantData, SessionData};
pub use error::PersistenceError;
pub use mutations::CompletedSignup;

/// Persistence adapter over a single `SQLite` connection.
///
/// All reads and writes go through this adapter; callers that need
/// shared access wrap it in their own synchronization.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL mode improves read concurrency for file-based databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Participants & Sessions
    // ========================================================================

    /// Creates a participant account from a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered or the
    /// insert fails.
    pub fn create_participant(
        &mut self,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::participants::create_participant(&mut self.conn, email, password_hash, display_name)
    }

    /// Retrieves a participant by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no
    /// account exists.
    pub fn get_participant_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<ParticipantData>, PersistenceError> {
        queries::participants::get_participant_by_email(&mut self.conn, email)
    }

    /// Retrieves a participant by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no
    /// account exists.
    pub fn get_participant_by_id(
        &mut self,
        participant_id: i64,
    ) -> Result<Option<ParticipantData>, PersistenceError> {
        queries::participants::get_participant_by_id(&mut self.conn, participant_id)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        participant_id: i64,
        expires_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::participants::create_session(
            &mut self.conn,
            session_token,
            participant_id,
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// session is not found.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::participants::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session by token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::participants::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::participants::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Events, Roles & Teams
    // ========================================================================

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is taken or the insert fails.
    pub fn create_event(&mut self, event: &Event) -> Result<i64, PersistenceError> {
        mutations::events::create_event(&mut self.conn, event)
    }

    /// Updates an event's settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the update fails.
    pub fn update_event(&mut self, event: &Event) -> Result<(), PersistenceError> {
        mutations::events::update_event(&mut self.conn, event)
    }

    /// Retrieves an event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// event is not found.
    pub fn get_event(&mut self, event_id: i64) -> Result<Option<Event>, PersistenceError> {
        queries::events::get_event(&mut self.conn, event_id)
    }

    /// Retrieves an event by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no
    /// event has the slug.
    pub fn get_event_by_slug(&mut self, slug: &str) -> Result<Option<Event>, PersistenceError> {
        queries::events::get_event_by_slug(&mut self.conn, slug)
    }

    /// Lists all events, newest start first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(&mut self) -> Result<Vec<Event>, PersistenceError> {
        queries::events::list_events(&mut self.conn)
    }

    /// Grants a role on an event, replacing any existing role.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn grant_event_role(
        &mut self,
        event_id: i64,
        participant_id: i64,
        role: EventRole,
    ) -> Result<(), PersistenceError> {
        mutations::events::grant_event_role(&mut self.conn, event_id, participant_id, role)
    }

    /// Retrieves a participant's role on an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no
    /// role was granted.
    pub fn get_event_role(
        &mut self,
        event_id: i64,
        participant_id: i64,
    ) -> Result<Option<EventRole>, PersistenceError> {
        queries::events::get_event_role(&mut self.conn, event_id, participant_id)
    }

    /// Finds a team by name within an event, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    pub fn find_or_create_team(
        &mut self,
        event_id: i64,
        name: &str,
        contact_email: Option<&str>,
        contact_phone: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::events::find_or_create_team(
            &mut self.conn,
            event_id,
            name,
            contact_email,
            contact_phone,
        )
    }

    /// Retrieves a team by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// team is not found.
    pub fn get_team(&mut self, team_id: i64) -> Result<Option<Team>, PersistenceError> {
        queries::events::get_team(&mut self.conn, team_id)
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Creates a single slot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlotStart` on a start-time collision, or an
    /// error if the insert fails.
    pub fn create_slot(&mut self, slot: &Slot) -> Result<i64, PersistenceError> {
        mutations::slots::create_slot(&mut self.conn, slot)
    }

    /// Creates a batch of planned slots atomically.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlotStart` on any start-time collision, or an
    /// error if the transaction fails.
    pub fn create_slots(
        &mut self,
        event_id: i64,
        planned: &[PlannedSlot],
    ) -> Result<Vec<i64>, PersistenceError> {
        mutations::slots::create_slots(&mut self.conn, event_id, planned)
    }

    /// Retrieves a slot by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// slot is not found.
    pub fn get_slot(&mut self, slot_id: i64) -> Result<Option<Slot>, PersistenceError> {
        queries::slots::get_slot(&mut self.conn, slot_id)
    }

    /// Lists an event's slots in organizer-defined order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots_for_event(&mut self, event_id: i64) -> Result<Vec<Slot>, PersistenceError> {
        queries::slots::list_slots_for_event(&mut self.conn, event_id)
    }

    /// Returns the highest `sort_order` among an event's slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// event has no slots.
    pub fn max_sort_order(&mut self, event_id: i64) -> Result<Option<i64>, PersistenceError> {
        queries::slots::max_sort_order(&mut self.conn, event_id)
    }

    /// Deletes a slot. Dependent rows are removed by cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist or the delete fails.
    pub fn delete_slot(&mut self, slot_id: i64) -> Result<(), PersistenceError> {
        mutations::slots::delete_slot(&mut self.conn, slot_id)
    }

    /// Lists slots starting within `[from, to)`, across all events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slots_starting_between(
        &mut self,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<Slot>, PersistenceError> {
        queries::slots::slots_starting_between(&mut self.conn, from, to)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Inserts a confirmed booking, losing to any existing confirmed
    /// booking on the slot.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmedBookingExists` if the slot is held, or an
    /// error if the insert fails.
    pub fn insert_confirmed_booking(&mut self, booking: &Booking) -> Result<i64, PersistenceError> {
        mutations::bookings::insert_confirmed_booking(&mut self.conn, booking)
    }

    /// Retrieves a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// booking is not found.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Retrieves the confirmed booking holding a slot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// slot is free.
    pub fn confirmed_booking_for_slot(
        &mut self,
        slot_id: i64,
    ) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::confirmed_booking_for_slot(&mut self.conn, slot_id)
    }

    /// Updates a booking's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or the update
    /// fails.
    pub fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::set_booking_status(&mut self.conn, booking_id, status)
    }

    /// Lists every booking for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_event(&mut self.conn, event_id)
    }

    /// Lists confirmed bookings holding any of the given slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn confirmed_bookings_for_slots(
        &mut self,
        slot_ids: &[i64],
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::confirmed_bookings_for_slots(&mut self.conn, slot_ids)
    }

    /// Counts a participant's confirmed bookings in an event by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_confirmed_bookings_for_email(
        &mut self,
        event_id: i64,
        email: &str,
    ) -> Result<i64, PersistenceError> {
        queries::bookings::count_confirmed_bookings_for_email(&mut self.conn, event_id, email)
    }

    // ========================================================================
    // Waitlist
    // ========================================================================

    /// Inserts a waitlist entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_waitlist_entry(
        &mut self,
        entry: &WaitlistEntry,
    ) -> Result<i64, PersistenceError> {
        mutations::waitlist::insert_waitlist_entry(&mut self.conn, entry)
    }

    /// Retrieves a waitlist entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// entry is not found.
    pub fn get_waitlist_entry(
        &mut self,
        waitlist_id: i64,
    ) -> Result<Option<WaitlistEntry>, PersistenceError> {
        queries::waitlist::get_waitlist_entry(&mut self.conn, waitlist_id)
    }

    /// Returns the highest position on a slot's waitlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// waitlist is empty.
    pub fn max_waitlist_position(
        &mut self,
        slot_id: i64,
    ) -> Result<Option<i64>, PersistenceError> {
        queries::waitlist::max_waitlist_position(&mut self.conn, slot_id)
    }

    /// Lists a slot's waitlist in promotion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn waitlist_for_slot(
        &mut self,
        slot_id: i64,
    ) -> Result<Vec<WaitlistEntry>, PersistenceError> {
        queries::waitlist::waitlist_for_slot(&mut self.conn, slot_id)
    }

    /// Lists every waitlist entry across an event's slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn waitlist_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<WaitlistEntry>, PersistenceError> {
        queries::waitlist::waitlist_for_event(&mut self.conn, event_id)
    }

    /// Deletes a waitlist entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or the delete
    /// fails.
    pub fn delete_waitlist_entry(&mut self, waitlist_id: i64) -> Result<(), PersistenceError> {
        mutations::waitlist::delete_waitlist_entry(&mut self.conn, waitlist_id)
    }

    // ========================================================================
    // Swap Requests
    // ========================================================================

    /// Creates a pending swap request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_swap_request(
        &mut self,
        event_id: i64,
        requester_booking_id: i64,
        target_booking_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::swaps::create_swap_request(
            &mut self.conn,
            event_id,
            requester_booking_id,
            target_booking_id,
        )
    }

    /// Retrieves a swap request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// request is not found.
    pub fn get_swap(&mut self, swap_id: i64) -> Result<Option<SwapRequest>, PersistenceError> {
        queries::swaps::get_swap(&mut self.conn, swap_id)
    }

    /// Checks whether the requester already has a pending swap request
    /// against the target booking. Direction matters; a counter-offer
    /// from the target is not a duplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_pending_swap(
        &mut self,
        requester_booking_id: i64,
        target_booking_id: i64,
    ) -> Result<bool, PersistenceError> {
        queries::swaps::has_pending_swap(&mut self.conn, requester_booking_id, target_booking_id)
    }

    /// Moves a pending swap request to a terminal status without
    /// exchanging slots. Used for declines and withdrawals.
    ///
    /// # Errors
    ///
    /// Returns `SwapNotPending` if the request was already resolved, or
    /// an error if the update fails.
    pub fn resolve_swap(
        &mut self,
        swap_id: i64,
        status: SwapStatus,
        responded_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::swaps::resolve_swap(&mut self.conn, swap_id, status, responded_at)
    }

    /// Accepts a swap request, exchanging the two bookings' slots in a
    /// single transaction with revalidation.
    ///
    /// # Errors
    ///
    /// Returns `SwapNotPending` if the request was already resolved,
    /// `BookingNotConfirmed` if either side no longer holds its slot,
    /// or an error if the transaction fails.
    pub fn accept_swap(
        &mut self,
        swap_id: i64,
        responded_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::swaps::accept_swap(&mut self.conn, swap_id, responded_at)
    }

    /// Lists pending swap requests involving any of the given bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending_swaps_for_bookings(
        &mut self,
        booking_ids: &[i64],
    ) -> Result<Vec<SwapRequest>, PersistenceError> {
        queries::swaps::pending_swaps_for_bookings(&mut self.conn, booking_ids)
    }

    // ========================================================================
    // Signup Verifications
    // ========================================================================

    /// Creates a signup verification token.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_verification(
        &mut self,
        verification: &NewVerification,
    ) -> Result<i64, PersistenceError> {
        mutations::verifications::create_verification(&mut self.conn, verification)
    }

    /// Completes a signup by consuming a verification token, creating
    /// the booking or waitlist entry in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `VerificationInvalid` for unknown, expired, or consumed
    /// tokens; `ConfirmedBookingExists` if the slot is taken and the
    /// signer declined the waitlist; or an error if the transaction
    /// fails.
    pub fn complete_verification(
        &mut self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<CompletedSignup, PersistenceError> {
        mutations::verifications::complete_verification(&mut self.conn, token, now)
    }

    // ========================================================================
    // Reminders
    // ========================================================================

    /// Records that a reminder was sent, returning `false` when the
    /// `(booking, kind)` pair was already recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for another reason.
    pub fn record_reminder_sent(
        &mut self,
        booking_id: i64,
        kind: ReminderKind,
        sent_at: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::reminders::record_reminder_sent(&mut self.conn, booking_id, kind, sent_at)
    }

    /// Checks whether a reminder of the given kind was already sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reminder_already_sent(
        &mut self,
        booking_id: i64,
        kind: ReminderKind,
    ) -> Result<bool, PersistenceError> {
        queries::reminders::reminder_sent(&mut self.conn, booking_id, kind)
    }

    // ========================================================================
    // Audit Log
    // ========================================================================

    /// Appends an audit record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_audit(
        &mut self,
        record: &AuditRecord,
        recorded_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::audit::record_audit(&mut self.conn, record, recorded_at)
    }

    /// Lists an event's audit entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<AuditEntryData>, PersistenceError> {
        queries::audit::audit_for_event(&mut self.conn, event_id)
    }
}
