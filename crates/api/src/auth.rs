// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization for the API layer.
//!
//! Identity is passed explicitly: every handler that acts on behalf of a
//! participant takes an [`AuthenticatedActor`] parameter. There is no
//! ambient current-user lookup.

use slotbook_audit::Actor;
use slotbook_domain::{Booking, Event, EventRole, validate_contact};
use slotbook_persistence::{ParticipantData, Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::{ApiError, AuthError};

/// An authenticated participant performing an API action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    participant_id: i64,
    email: String,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(participant_id: i64, email: String) -> Self {
        Self {
            participant_id,
            email,
        }
    }

    /// Returns the participant's canonical identifier.
    #[must_use]
    pub const fn participant_id(&self) -> i64 {
        self.participant_id
    }

    /// Returns the participant's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Converts this actor into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(
            self.participant_id.to_string(),
            String::from("participant"),
        )
    }

    /// Returns whether this actor owns the given booking.
    ///
    /// Ownership is by account when the booking was made while signed in,
    /// and by email otherwise (anonymous signups carry only contact
    /// details).
    #[must_use]
    pub fn owns_booking(&self, booking: &Booking) -> bool {
        match booking.user_id {
            Some(user_id) => user_id == self.participant_id,
            None => booking.contact.email.eq_ignore_ascii_case(&self.email),
        }
    }
}

/// Authorization rules for event-scoped actions.
///
/// These functions are pure: the caller fetches the actor's event role
/// from the store and passes it in, which keeps every rule independently
/// testable.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may manage an event's settings, slots, and
    /// bookings.
    ///
    /// The event owner always may; otherwise an `admin` or `coordinator`
    /// role grant is required.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `event` - The event being managed
    /// * `role` - The actor's role grant on the event, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the owner nor a manager.
    pub fn authorize_event_management(
        actor: &AuthenticatedActor,
        event: &Event,
        role: Option<EventRole>,
    ) -> Result<(), AuthError> {
        if event.created_by == actor.participant_id {
            return Ok(());
        }
        if role.is_some_and(|r| r.can_manage()) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("manage_event"),
            required_role: String::from("coordinator"),
        })
    }

    /// Checks if an actor may cancel a booking.
    ///
    /// The booking's owner may cancel it; so may anyone allowed to manage
    /// the event.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `event` - The event the booking belongs to
    /// * `booking` - The booking being cancelled
    /// * `role` - The actor's role grant on the event, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the actor owns neither the booking nor the
    /// required role.
    pub fn authorize_booking_cancellation(
        actor: &AuthenticatedActor,
        event: &Event,
        booking: &Booking,
        role: Option<EventRole>,
    ) -> Result<(), AuthError> {
        if actor.owns_booking(booking) {
            return Ok(());
        }
        Self::authorize_event_management(actor, event, role).map_err(|_| {
            AuthError::Unauthorized {
                action: String::from("cancel_booking"),
                required_role: String::from("coordinator"),
            }
        })
    }

    /// Checks if an actor may create a swap request from a booking.
    ///
    /// Only the requester booking's owner may ask for a swap.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `requester` - The booking the actor wants to swap away
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not own the booking.
    pub fn authorize_swap_request(
        actor: &AuthenticatedActor,
        requester: &Booking,
    ) -> Result<(), AuthError> {
        if actor.owns_booking(requester) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("request_swap"),
            required_role: String::from("booking owner"),
        })
    }

    /// Checks if an actor may respond to a swap request.
    ///
    /// Only the target booking's owner may accept or decline.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `target` - The target booking of the swap request
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not own the target booking.
    pub fn authorize_swap_response(
        actor: &AuthenticatedActor,
        target: &Booking,
    ) -> Result<(), AuthError> {
        if actor.owns_booking(target) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("respond_to_swap"),
            required_role: String::from("target booking owner"),
        })
    }

    /// Checks if an actor may read an event's audit log.
    ///
    /// The owner and any role grant (`viewer` included) qualify; plain
    /// participants do not.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `event` - The event whose audit log is requested
    /// * `role` - The actor's role grant on the event, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has no organizer-side access.
    pub fn authorize_audit_read(
        actor: &AuthenticatedActor,
        event: &Event,
        role: Option<EventRole>,
    ) -> Result<(), AuthError> {
        if event.created_by == actor.participant_id {
            return Ok(());
        }
        match role {
            Some(EventRole::Admin | EventRole::Coordinator | EventRole::Viewer) => Ok(()),
            Some(EventRole::Participant) | None => Err(AuthError::Unauthorized {
                action: String::from("read_audit_log"),
                required_role: String::from("viewer"),
            }),
        }
    }
}

/// Session-based authentication over bcrypt password hashes.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a new participant account.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plain-text password, hashed here with bcrypt
    /// * `display_name` - Optional display name
    ///
    /// # Returns
    ///
    /// The new participant's canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed or already registered,
    /// or if hashing or the insert fails.
    pub fn register(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<i64, ApiError> {
        validate_contact(email).map_err(crate::error::translate_domain_error)?;

        if persistence
            .get_participant_by_email(email)
            .map_err(crate::error::translate_persistence_error)?
            .is_some()
        {
            return Err(ApiError::Conflict {
                rule: String::from("unique_email"),
                message: format!("An account already exists for '{}'", email.to_lowercase()),
            });
        }

        let password_hash: String =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| ApiError::Internal {
                message: format!("Failed to hash password: {e}"),
            })?;

        let participant_id: i64 = persistence
            .create_participant(email, &password_hash, display_name)
            .map_err(crate::error::translate_persistence_error)?;

        info!(participant_id, "Participant registered");
        Ok(participant_id)
    }

    /// Authenticates a participant and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plain-text password to verify
    /// * `now` - The current time, for session expiry
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`).
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown, the password does not
    /// match, or session creation fails. Unknown accounts and wrong
    /// passwords are indistinguishable to the caller.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(String, AuthenticatedActor), AuthError> {
        let participant: ParticipantData = persistence
            .get_participant_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        let verified: bool = bcrypt::verify(password, &participant.password_hash).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            }
        })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;

        persistence
            .create_session(&session_token, participant.participant_id, expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        debug!(
            participant_id = participant.participant_id,
            "Session created"
        );

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(participant.participant_id, participant.email);
        Ok((session_token, actor))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    /// * `now` - The current time, for expiry checks
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or if the
    /// account behind it no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        if now > session.expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let participant: ParticipantData = persistence
            .get_participant_by_id(session.participant_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Participant not found"),
            })?;

        Ok(AuthenticatedActor::new(
            participant.participant_id,
            participant.email,
        ))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Generates an opaque session token: 128 bits of randomness, hex
    /// encoded.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) => AuthError::AuthenticationFailed {
                reason: msg,
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
