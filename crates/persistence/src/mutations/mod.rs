// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database mutations.
//!
//! All writes go through this module. Mutations use Diesel DSL, run on a
//! single connection, and surface constraint violations as typed
//! [`crate::error::PersistenceError`] variants.

pub mod audit;
pub mod bookings;
pub mod events;
pub mod participants;
pub mod reminders;
pub mod slots;
pub mod swaps;
pub mod verifications;
pub mod waitlist;

pub use verifications::CompletedSignup;
