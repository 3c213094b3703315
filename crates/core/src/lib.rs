// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure decision logic for the booking workflow.
//!
//! Functions in this crate take observed store state as arguments and return
//! decisions; they perform no I/O of their own. The store remains the sole
//! arbiter under races: a decision to confirm a booking can still lose to a
//! concurrent insert, which the caller detects as a uniqueness conflict and
//! feeds back in as `slot_taken = true`.

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

mod error;
mod reminder;
mod signup;
mod slot_plan;
mod swap;
mod waitlist;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use reminder::ReminderKind;
pub use signup::{SignupResolution, resolve_signup};
pub use slot_plan::{PlannedSlot, plan_slots};
pub use swap::{validate_swap_request, validate_swap_response};
pub use waitlist::{next_waitlist_position, promotion_candidate};
