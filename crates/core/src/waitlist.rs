// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::WaitlistEntry;

/// Returns the position for a new waitlist entry.
///
/// Positions are monotonically increasing per slot, starting at 1 for an
/// empty waitlist.
#[must_use]
pub const fn next_waitlist_position(max_position: Option<i64>) -> i64 {
    match max_position {
        Some(max) => max + 1,
        None => 1,
    }
}

/// Picks the entry to promote when a slot's confirmed booking is cancelled.
///
/// Promotion is strictly FIFO: the entry with the lowest `position` wins.
/// Exactly one entry is promoted per cancellation; if the promotion insert
/// later loses to a fresh direct signup, the entry stays queued for the next
/// cancellation.
#[must_use]
pub fn promotion_candidate(entries: &[WaitlistEntry]) -> Option<&WaitlistEntry> {
    entries.iter().min_by_key(|entry| entry.position)
}
