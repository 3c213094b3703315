// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database queries.
//!
//! Read paths live here. Lookups that can reasonably miss return
//! `Ok(None)`; errors are reserved for actual failures.

pub mod audit;
pub mod bookings;
pub mod events;
pub mod participants;
pub mod reminders;
pub mod slots;
pub mod swaps;
pub mod verifications;
pub mod waitlist;
