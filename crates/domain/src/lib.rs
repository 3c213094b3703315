// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    Booking, BookingStatus, ContactInfo, Event, EventRole, Slot, SwapRequest, SwapStatus, Team,
    WaitlistEntry,
};
pub use validation::{
    validate_contact, validate_event_fields, validate_slot_duration, validate_slot_label,
    validate_slot_times, validate_slug,
};
