// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data transfer structs returned by the persistence layer.
//!
//! These carry rows that have no counterpart in the domain crate:
//! account records, sessions, signup verifications, and audit entries.

use time::OffsetDateTime;

/// A registered participant account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantData {
    /// The participant ID.
    pub participant_id: i64,
    /// The participant's email address (unique).
    pub email: String,
    /// The bcrypt password hash.
    pub password_hash: String,
    /// Optional display name.
    pub display_name: Option<String>,
}

/// An authentication session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// The session ID.
    pub session_id: i64,
    /// The opaque session token.
    pub session_token: String,
    /// The participant this session belongs to.
    pub participant_id: i64,
    /// When the session expires.
    pub expires_at: OffsetDateTime,
}

/// A pending signup verification, created when a signup is requested and
/// consumed when the emailed token is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationData {
    /// The verification ID.
    pub verification_id: i64,
    /// The single-use token.
    pub token: String,
    /// The event the signup targets.
    pub event_id: i64,
    /// The slot the signup targets.
    pub slot_id: i64,
    /// The signer's email address.
    pub participant_email: String,
    /// The signer's name, if given.
    pub participant_name: Option<String>,
    /// The signer's phone number, if given.
    pub participant_phone: Option<String>,
    /// Team name to attach the booking to, if given.
    pub team_name: Option<String>,
    /// The authenticated participant, if the signup was made while logged in.
    pub user_id: Option<i64>,
    /// Whether the signer opted into the waitlist if the slot is taken.
    pub join_waitlist: bool,
    /// When the token stops being honored.
    pub expires_at: OffsetDateTime,
}

/// Input for creating a signup verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVerification {
    /// The single-use token.
    pub token: String,
    /// The event the signup targets.
    pub event_id: i64,
    /// The slot the signup targets.
    pub slot_id: i64,
    /// The signer's email address.
    pub participant_email: String,
    /// The signer's name, if given.
    pub participant_name: Option<String>,
    /// The signer's phone number, if given.
    pub participant_phone: Option<String>,
    /// Team name to attach the booking to, if given.
    pub team_name: Option<String>,
    /// The authenticated participant, if any.
    pub user_id: Option<i64>,
    /// Whether the signer opted into the waitlist.
    pub join_waitlist: bool,
    /// When the token stops being honored.
    pub expires_at: OffsetDateTime,
}

/// A persisted audit log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntryData {
    /// The audit entry ID.
    pub audit_id: i64,
    /// The event scope, if any.
    pub event_id: Option<i64>,
    /// The acting identity.
    pub actor_id: String,
    /// The actor kind: "participant", "organizer", or "system".
    pub actor_type: String,
    /// The machine-readable action name.
    pub action: String,
    /// The kind of resource touched.
    pub resource_type: String,
    /// The touched resource's ID, if any.
    pub resource_id: Option<i64>,
    /// Optional action details.
    pub details: Option<String>,
    /// When the entry was recorded.
    pub created_at: OffsetDateTime,
}
