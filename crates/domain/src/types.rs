// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents the lifecycle state of a booking.
///
/// A slot may hold at most one `Confirmed` booking at any time; that
/// invariant is enforced by the store, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// The booking currently holds its slot.
    #[default]
    Confirmed,
    /// The booking was released, either by its owner or by an organizer.
    Cancelled,
    /// The booking was created by promoting a waitlist entry.
    WaitlistPromoted,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "waitlist_promoted" => Ok(Self::WaitlistPromoted),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::WaitlistPromoted => "waitlist_promoted",
        }
    }

    /// Returns whether the booking currently occupies its slot.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::WaitlistPromoted)
    }
}

/// Represents the lifecycle state of a swap request.
///
/// Valid transitions are `Pending → Accepted` and `Pending → Declined`;
/// both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwapStatus {
    /// Waiting for the target booking's owner to respond.
    #[default]
    Pending,
    /// The target owner accepted; the slot exchange has been applied.
    Accepted,
    /// The target owner declined; no data was exchanged.
    Declined,
    /// The request was withdrawn before a response.
    Cancelled,
}

impl FromStr for SwapStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidSwapStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SwapStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this state to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Declined)
                | (Self::Pending, Self::Cancelled)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Represents a participant's role on a specific event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventRole {
    /// Full control over the event, its slots, and its bookings.
    Admin,
    /// May manage slots and bookings but not grant roles.
    Coordinator,
    /// Read-only access to organizer views.
    Viewer,
    /// A regular participant with no management rights.
    Participant,
}

impl FromStr for EventRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "coordinator" => Ok(Self::Coordinator),
            "viewer" => Ok(Self::Viewer),
            "participant" => Ok(Self::Participant),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coordinator => "coordinator",
            Self::Viewer => "viewer",
            Self::Participant => "participant",
        }
    }

    /// Returns whether this role may manage the event's slots and bookings.
    #[must_use]
    pub const fn can_manage(&self) -> bool {
        matches!(self, Self::Admin | Self::Coordinator)
    }
}

/// An event with bookable time slots, reachable via its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the event has not been persisted yet.
    pub event_id: Option<i64>,
    /// The event title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// URL-safe unique identifier used in shared links.
    pub slug: String,
    /// When the event begins.
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    /// When the event ends, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    /// IANA timezone identifier, carried for presentation.
    pub timezone: String,
    /// Whether booked slots display participant contact details.
    pub show_contact: bool,
    /// Whether participants may request slot swaps.
    pub allow_swap: bool,
    /// Whether full slots accept waitlist entries.
    pub allow_waitlist: bool,
    /// Maximum confirmed bookings a single participant may hold.
    pub max_signups_per_participant: i64,
    /// Address notified when a participant can't find a slot.
    pub notify_email: Option<String>,
    /// The participant who created the event.
    pub created_by: i64,
}

impl Event {
    /// Creates a new `Event` without a persisted ID.
    #[must_use]
    pub fn new(title: &str, slug: &str, starts_at: OffsetDateTime, created_by: i64) -> Self {
        Self {
            event_id: None,
            title: title.to_string(),
            description: None,
            slug: slug.to_string(),
            starts_at,
            ends_at: None,
            timezone: String::from("UTC"),
            show_contact: true,
            allow_swap: true,
            allow_waitlist: true,
            max_signups_per_participant: 1,
            notify_email: None,
            created_by,
        }
    }
}

/// A bookable interval belonging to exactly one event.
///
/// No two slots within one event may share a start timestamp; the store
/// enforces this and surfaces violations as conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the slot has not been persisted yet.
    pub slot_id: Option<i64>,
    /// The owning event.
    pub event_id: i64,
    /// When the slot begins.
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    /// When the slot ends. Always after `starts_at`.
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    /// Optional display label.
    pub label: Option<String>,
    /// Position of the slot in organizer-defined ordering.
    pub sort_order: i64,
}

impl Slot {
    /// Creates a new `Slot` without a persisted ID.
    #[must_use]
    pub const fn new(
        event_id: i64,
        starts_at: OffsetDateTime,
        ends_at: OffsetDateTime,
        label: Option<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            slot_id: None,
            event_id,
            starts_at,
            ends_at,
            label,
            sort_order,
        }
    }
}

/// Contact details supplied at signup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Participant email. Required for every booking and waitlist entry.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional phone number for SMS notifications.
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Creates contact info with only an email address.
    #[must_use]
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: None,
            phone: None,
        }
    }
}

/// A claim on a slot by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the booking has not been persisted yet.
    pub booking_id: Option<i64>,
    /// The claimed slot.
    pub slot_id: i64,
    /// The owning event, denormalized for event-scoped queries.
    pub event_id: i64,
    /// Optional team this booking belongs to.
    pub team_id: Option<i64>,
    /// Contact details captured at signup.
    pub contact: ContactInfo,
    /// The authenticated participant who owns the booking, if any.
    pub user_id: Option<i64>,
    /// Current lifecycle state.
    pub status: BookingStatus,
}

impl Booking {
    /// Creates a new confirmed `Booking` without a persisted ID.
    #[must_use]
    pub const fn new(slot_id: i64, event_id: i64, contact: ContactInfo) -> Self {
        Self {
            booking_id: None,
            slot_id,
            event_id,
            team_id: None,
            contact,
            user_id: None,
            status: BookingStatus::Confirmed,
        }
    }
}

/// A queued claim on an occupied slot.
///
/// Entries are promoted strictly in ascending `position` order, one per
/// cancellation of the slot's confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the entry has not been persisted yet.
    pub waitlist_id: Option<i64>,
    /// The slot being waited on.
    pub slot_id: i64,
    /// The owning event.
    pub event_id: i64,
    /// Optional team association carried into the promoted booking.
    pub team_id: Option<i64>,
    /// Contact details carried into the promoted booking.
    pub contact: ContactInfo,
    /// The authenticated participant who queued, if any.
    pub user_id: Option<i64>,
    /// FIFO position, monotonically increasing within the slot.
    pub position: i64,
}

/// A request to exchange the slots of two confirmed bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the request has not been persisted yet.
    pub swap_id: Option<i64>,
    /// The event both bookings belong to.
    pub event_id: i64,
    /// The booking whose owner initiated the request.
    pub requester_booking_id: i64,
    /// The booking whose owner must respond.
    pub target_booking_id: i64,
    /// Current lifecycle state.
    pub status: SwapStatus,
    /// When the target owner responded, if they have.
    #[serde(with = "time::serde::rfc3339::option")]
    pub responded_at: Option<OffsetDateTime>,
}

/// A named grouping of bookings within an event, created lazily on first
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the team has not been persisted yet.
    pub team_id: Option<i64>,
    /// The owning event.
    pub event_id: i64,
    /// Team name, unique within the event by convention.
    pub name: String,
    /// Optional shared contact email.
    pub contact_email: Option<String>,
    /// Optional shared contact phone.
    pub contact_phone: Option<String>,
}

impl Team {
    /// Creates a new `Team` without a persisted ID.
    #[must_use]
    pub fn new(event_id: i64, name: &str) -> Self {
        Self {
            team_id: None,
            event_id,
            name: name.to_string(),
            contact_email: None,
            contact_phone: None,
        }
    }
}
