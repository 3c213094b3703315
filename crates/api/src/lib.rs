// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Slotbook booking system.
//!
//! This crate orchestrates the booking workflows over the persistence
//! layer: typed handlers that take explicit identity, authorization
//! checks, error translation into the API contract, audit recording, and
//! best-effort notification dispatch. It knows nothing about HTTP; the
//! server crate maps these handlers onto routes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    cancel_booking, complete_signup, create_event, create_slot, delete_slot, duplicate_event,
    event_audit_log, event_detail, generate_slots, grant_role, list_events, list_pending_swaps,
    request_signup, request_swap, respond_to_swap, run_reminder_sweep, update_event,
};
pub use notify::{LogNotifier, Notifier, NotifyError, notify_contact, notify_email};
pub use request_response::{
    BookingView, CancellationResult, CreateEventRequest, CreateSlotRequest, CreateSwapRequest,
    DuplicateEventRequest, EventDetail, GenerateSlotsRequest, PendingSwaps, ReminderSweepReport,
    SignupOutcome, SignupRequest, SignupRequested, SlotView, SwapResolution, UpdateEventRequest,
};
