// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// A stored timestamp could not be parsed or formatted.
    TimestampError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested event was not found.
    EventNotFound(i64),
    /// No event exists with the given slug.
    EventSlugNotFound(String),
    /// The requested slot was not found.
    SlotNotFound(i64),
    /// The requested booking was not found.
    BookingNotFound(i64),
    /// The requested waitlist entry was not found.
    WaitlistEntryNotFound(i64),
    /// The requested swap request was not found.
    SwapNotFound(i64),
    /// The requested participant was not found.
    ParticipantNotFound(i64),
    /// The requested session was not found.
    SessionNotFound(String),
    /// A confirmed booking already occupies the slot.
    ConfirmedBookingExists { slot_id: i64 },
    /// Another slot in the event already starts at the same time.
    DuplicateSlotStart { event_id: i64 },
    /// The swap request is no longer pending.
    SwapNotPending { swap_id: i64 },
    /// The booking is not in confirmed status.
    BookingNotConfirmed { booking_id: i64 },
    /// The verification token is unknown, expired, or already used.
    VerificationInvalid,
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::TimestampError(msg) => write!(f, "Timestamp error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::EventSlugNotFound(slug) => write!(f, "Event not found for slug: {slug}"),
            Self::SlotNotFound(id) => write!(f, "Slot not found: {id}"),
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::WaitlistEntryNotFound(id) => write!(f, "Waitlist entry not found: {id}"),
            Self::SwapNotFound(id) => write!(f, "Swap request not found: {id}"),
            Self::ParticipantNotFound(id) => write!(f, "Participant not found: {id}"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::ConfirmedBookingExists { slot_id } => {
                write!(f, "Slot {slot_id} already has a confirmed booking")
            }
            Self::DuplicateSlotStart { event_id } => {
                write!(
                    f,
                    "Event {event_id} already has a slot with that start time"
                )
            }
            Self::SwapNotPending { swap_id } => {
                write!(f, "Swap request {swap_id} is no longer pending")
            }
            Self::BookingNotConfirmed { booking_id } => {
                write!(f, "Booking {booking_id} is not confirmed")
            }
            Self::VerificationInvalid => {
                write!(f, "Verification token is unknown, expired, or already used")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<slotbook_core::CoreError> for PersistenceError {
    fn from(err: slotbook_core::CoreError) -> Self {
        Self::Other(err.to_string())
    }
}
