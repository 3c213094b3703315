// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use slotbook_core::CoreError;
use slotbook_domain::DomainError;
use slotbook_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the API contract: not-found, forbidden, conflict, validation, and
/// internal failure, each with enough context for the HTTP layer to pick
/// a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request lost to existing state: an occupied slot, a duplicate
    /// slug or start time, an already-resolved swap.
    Conflict {
        /// The uniqueness or lifecycle rule that was hit.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A workflow rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A downstream dependency failed.
    UpstreamFailure {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::UpstreamFailure { message } => {
                write!(f, "Upstream failure: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidSlug(msg) => ApiError::InvalidInput {
            field: String::from("slug"),
            message: msg,
        },
        DomainError::InvalidTimezone(msg) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: msg,
        },
        DomainError::InvalidSlotTimes { starts_at, ends_at } => ApiError::InvalidInput {
            field: String::from("ends_at"),
            message: format!("Slot end time {ends_at} must be after start time {starts_at}"),
        },
        DomainError::InvalidSlotDuration { minutes } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("Invalid slot duration: {minutes} minutes. Must be between 5 and 480"),
        },
        DomainError::InvalidSlotLabel { length } => ApiError::InvalidInput {
            field: String::from("label"),
            message: format!("Slot label is {length} characters. Must be at most 200"),
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidMaxSignups { count } => ApiError::InvalidInput {
            field: String::from("max_signups_per_participant"),
            message: format!("Invalid max signups per participant: {count}. Must be at least 1"),
        },
        DomainError::InvalidBookingStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown booking status '{value}'"),
        },
        DomainError::InvalidSwapStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown swap request status '{value}'"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown event role '{value}'"),
        },
        DomainError::InvalidReminderKind(value) => ApiError::InvalidInput {
            field: String::from("reminder_kind"),
            message: format!("Unknown reminder kind '{value}'"),
        },
        DomainError::InvalidTeamName(msg) => ApiError::InvalidInput {
            field: String::from("team_name"),
            message: msg,
        },
    }
}

/// Translates a core workflow error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SlotNotInEvent { slot_id, event_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} does not belong to event {event_id}"),
        },
        CoreError::SlotTaken { slot_id } => ApiError::Conflict {
            rule: String::from("one_confirmed_booking_per_slot"),
            message: format!("Slot {slot_id} is already taken"),
        },
        CoreError::SwapNotAllowed { event_id } => ApiError::DomainRuleViolation {
            rule: String::from("swaps_enabled"),
            message: format!("Event {event_id} does not allow slot swaps"),
        },
        CoreError::SameBookingSwap => ApiError::DomainRuleViolation {
            rule: String::from("distinct_swap_bookings"),
            message: String::from("Cannot request a swap between a booking and itself"),
        },
        CoreError::BookingNotConfirmed { booking_id } => ApiError::DomainRuleViolation {
            rule: String::from("swap_bookings_confirmed"),
            message: format!("Booking {booking_id} is not confirmed"),
        },
        CoreError::SwapAcrossEvents {
            requester_event_id,
            target_event_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("swap_within_event"),
            message: format!(
                "Cannot swap across events: requester booking is in event {requester_event_id}, target booking is in event {target_event_id}"
            ),
        },
        CoreError::DuplicatePendingSwap {
            requester_booking_id,
            target_booking_id,
        } => ApiError::Conflict {
            rule: String::from("one_pending_swap_per_pair"),
            message: format!(
                "A pending swap request from booking {requester_booking_id} to booking {target_booking_id} already exists"
            ),
        },
        CoreError::SwapAlreadyResolved { status } => ApiError::Conflict {
            rule: String::from("swap_pending"),
            message: format!("Swap request has already been resolved as '{status}'"),
        },
        CoreError::EmptySlotPlan => ApiError::InvalidInput {
            field: String::from("range"),
            message: String::from("No slots fit the requested range and duration"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Typed not-found and conflict variants map to their API counterparts;
/// everything else is an internal failure whose details stay in the logs.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist"),
        },
        PersistenceError::EventSlugNotFound(slug) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("No event has the slug '{slug}'"),
        },
        PersistenceError::SlotNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {id} does not exist"),
        },
        PersistenceError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} does not exist"),
        },
        PersistenceError::WaitlistEntryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Waitlist entry"),
            message: format!("Waitlist entry {id} does not exist"),
        },
        PersistenceError::SwapNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Swap request"),
            message: format!("Swap request {id} does not exist"),
        },
        PersistenceError::ParticipantNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant {id} does not exist"),
        },
        PersistenceError::VerificationInvalid => ApiError::ResourceNotFound {
            resource_type: String::from("Signup verification"),
            message: String::from("The verification token is unknown, expired, or already used"),
        },
        PersistenceError::ConfirmedBookingExists { slot_id } => ApiError::Conflict {
            rule: String::from("one_confirmed_booking_per_slot"),
            message: format!("Slot {slot_id} already holds a confirmed booking"),
        },
        PersistenceError::DuplicateSlotStart { event_id } => ApiError::Conflict {
            rule: String::from("unique_slot_start"),
            message: format!("Event {event_id} already has a slot with that start time"),
        },
        PersistenceError::SwapNotPending { swap_id } => ApiError::Conflict {
            rule: String::from("swap_pending"),
            message: format!("Swap request {swap_id} is no longer pending"),
        },
        PersistenceError::BookingNotConfirmed { booking_id } => ApiError::Conflict {
            rule: String::from("swap_bookings_confirmed"),
            message: format!("Booking {booking_id} is no longer confirmed"),
        },
        _ => ApiError::Internal {
            message: format!("Store operation failed: {err}"),
        },
    }
}
