// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::DomainError;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// A reminder lookahead window before a slot's start time.
///
/// Window bounds are widened around their nominal offsets so that a sweep
/// invoked every few minutes cannot skip past a slot between runs. The
/// persisted (booking, kind) record is what keeps the widened windows from
/// producing duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// Nominal 24 hours before start (23h50m–24h10m).
    DayBefore,
    /// Nominal 30 minutes before start (25m–35m).
    HalfHour,
    /// Nominal 15 minutes before start (10m–20m).
    QuarterHour,
}

impl FromStr for ReminderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::DayBefore),
            "30m" => Ok(Self::HalfHour),
            "15m" => Ok(Self::QuarterHour),
            _ => Err(DomainError::InvalidReminderKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReminderKind {
    /// All windows, in the order the sweep scans them.
    pub const ALL: [Self; 3] = [Self::DayBefore, Self::HalfHour, Self::QuarterHour];

    /// The persisted dedup key for this window.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DayBefore => "24h",
            Self::HalfHour => "30m",
            Self::QuarterHour => "15m",
        }
    }

    /// Human-readable phrasing used in the reminder message.
    #[must_use]
    pub const fn when_label(&self) -> &'static str {
        match self {
            Self::DayBefore => "1 day before",
            Self::HalfHour => "30 minutes before",
            Self::QuarterHour => "15 minutes before",
        }
    }

    /// Lower and upper bound of the window in minutes before slot start.
    #[must_use]
    pub const fn bounds_minutes(&self) -> (i64, i64) {
        match self {
            Self::DayBefore => (23 * 60 + 50, 24 * 60 + 10),
            Self::HalfHour => (25, 35),
            Self::QuarterHour => (10, 20),
        }
    }

    /// The absolute window: slots starting inside `[from, to]` are due for
    /// this reminder when the sweep runs at `now`.
    #[must_use]
    pub fn window(&self, now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let (min_minutes, max_minutes) = self.bounds_minutes();
        (
            now + Duration::minutes(min_minutes),
            now + Duration::minutes(max_minutes),
        )
    }
}
