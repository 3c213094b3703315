// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use slotbook_domain::{BookingStatus, ContactInfo, Event, Slot, SwapRequest, SwapStatus};
use time::OffsetDateTime;

/// API request to create a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    /// The event title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// URL-safe unique identifier used in shared links.
    pub slug: String,
    /// When the event begins.
    pub starts_at: OffsetDateTime,
    /// When the event ends, if known.
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
}

/// API request to update an existing event's settings.
///
/// The slug is immutable: it appears in links that have already been
/// shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEventRequest {
    /// The event to update.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the event begins.
    pub starts_at: OffsetDateTime,
    /// When the event ends, if known.
    pub ends_at: Option<OffsetDateTime>,
    /// IANA timezone identifier.
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
}

/// API request to duplicate an event.
///
/// Event fields and slots are copied; bookings, waitlists, and swap
/// requests are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEventRequest {
    /// The event to copy.
    pub source_event_id: i64,
    /// The new event's slug.
    pub new_slug: String,
    /// The new event's title.
    pub new_title: String,
    /// When the new event begins.
    pub starts_at: OffsetDateTime,
}

/// API request to create a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSlotRequest {
    /// The owning event.
    pub event_id: i64,
    /// When the slot begins.
    pub starts_at: OffsetDateTime,
    /// When the slot ends.
    pub ends_at: OffsetDateTime,
    /// Optional display label.
    pub label: Option<String>,
}

/// API request to bulk-generate consecutive slots over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSlotsRequest {
    /// The owning event.
    pub event_id: i64,
    /// Start of the generation range.
    pub range_start: OffsetDateTime,
    /// End of the generation range.
    pub range_end: OffsetDateTime,
    /// Length of each slot in minutes.
    pub duration_minutes: i64,
    /// Optional label template; `{{n}}` is replaced with the 1-based
    /// slot number.
    pub label_template: Option<String>,
}

/// API request to start the two-step signup for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// The event's public slug.
    pub event_slug: String,
    /// The slot being claimed.
    pub slot_id: i64,
    /// Contact email for the signup.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional phone number for SMS notifications.
    pub phone: Option<String>,
    /// Optional team name; the team is created lazily on first use.
    pub team_name: Option<String>,
    /// Whether to join the waitlist if the slot is taken.
    pub join_waitlist: bool,
    /// The signed-in participant making the request, if any.
    pub user_id: Option<i64>,
}

/// API response after a signup request was accepted.
///
/// The token is delivered to the signer by email; callers decide whether
/// to expose it on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignupRequested {
    /// The stored verification row.
    pub verification_id: i64,
    /// The single-use confirmation token.
    pub token: String,
    /// When the token stops working.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

/// API response after a signup verification was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SignupOutcome {
    /// A confirmed booking was created.
    Booked {
        /// The new booking.
        booking_id: i64,
    },
    /// The slot was taken; a waitlist entry was created instead.
    Waitlisted {
        /// The new waitlist entry.
        waitlist_id: i64,
        /// The entry's FIFO position.
        position: i64,
    },
}

/// API response after cancelling a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancellationResult {
    /// The cancelled booking.
    pub booking_id: i64,
    /// The booking created by waitlist promotion, if one happened.
    pub promoted_booking_id: Option<i64>,
}

/// API request to create a swap request between two bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateSwapRequest {
    /// The booking the actor wants to swap away.
    pub requester_booking_id: i64,
    /// The booking whose owner must respond.
    pub target_booking_id: i64,
}

/// API response after responding to a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwapResolution {
    /// The swap request.
    pub swap_id: i64,
    /// Its status after the response.
    pub status: SwapStatus,
}

/// A booking as shown on an event detail page.
///
/// Contact details are present only when the event's `show_contact`
/// setting allows it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    /// The booking's identifier.
    pub booking_id: i64,
    /// The booking's lifecycle state.
    pub status: BookingStatus,
    /// Contact details, withheld when the event hides them.
    pub contact: Option<ContactInfo>,
    /// The team the booking belongs to, if any.
    pub team_id: Option<i64>,
}

/// One slot on an event detail page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotView {
    /// The slot itself.
    pub slot: Slot,
    /// The confirmed booking holding the slot, if any.
    pub booking: Option<BookingView>,
    /// How many entries are queued on the slot's waitlist.
    pub waitlist_count: usize,
}

/// API response for an event detail read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventDetail {
    /// The event.
    pub event: Event,
    /// Its slots in organizer-defined order, each with occupancy.
    pub slots: Vec<SlotView>,
}

/// API response listing a participant's pending swap requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingSwaps {
    /// Pending requests where the participant is requester or target.
    pub swaps: Vec<SwapRequest>,
}

/// API response summarizing a reminder sweep run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ReminderSweepReport {
    /// Reminders sent on this run.
    pub sent: usize,
    /// Bookings skipped because their reminder was already recorded.
    pub skipped: usize,
}
