// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event title is empty or invalid.
    InvalidTitle(String),
    /// Event slug is empty or contains characters outside `[a-z0-9-]`.
    InvalidSlug(String),
    /// Timezone identifier is empty.
    InvalidTimezone(String),
    /// Slot end time is not after its start time.
    InvalidSlotTimes {
        /// The slot's start timestamp.
        starts_at: OffsetDateTime,
        /// The slot's end timestamp.
        ends_at: OffsetDateTime,
    },
    /// Slot duration for bulk generation is outside the allowed range.
    InvalidSlotDuration {
        /// The invalid duration in minutes.
        minutes: i64,
    },
    /// Slot label exceeds the maximum length.
    InvalidSlotLabel {
        /// The length of the rejected label.
        length: usize,
    },
    /// Participant email is empty or malformed.
    InvalidEmail(String),
    /// Maximum signups per participant must be positive.
    InvalidMaxSignups {
        /// The invalid count value.
        count: i64,
    },
    /// Booking status string is not recognized.
    InvalidBookingStatus(String),
    /// Swap request status string is not recognized.
    InvalidSwapStatus(String),
    /// Event role string is not recognized.
    InvalidRole(String),
    /// Reminder kind string is not recognized.
    InvalidReminderKind(String),
    /// Team name is empty.
    InvalidTeamName(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidSlug(msg) => write!(f, "Invalid slug: {msg}"),
            Self::InvalidTimezone(msg) => write!(f, "Invalid timezone: {msg}"),
            Self::InvalidSlotTimes { starts_at, ends_at } => {
                write!(f, "Slot end time {ends_at} must be after start time {starts_at}")
            }
            Self::InvalidSlotDuration { minutes } => {
                write!(
                    f,
                    "Invalid slot duration: {minutes} minutes. Must be between 5 and 480"
                )
            }
            Self::InvalidSlotLabel { length } => {
                write!(f, "Slot label is {length} characters. Must be at most 200")
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidMaxSignups { count } => {
                write!(
                    f,
                    "Invalid max signups per participant: {count}. Must be at least 1"
                )
            }
            Self::InvalidBookingStatus(value) => {
                write!(f, "Unknown booking status '{value}'")
            }
            Self::InvalidSwapStatus(value) => {
                write!(f, "Unknown swap request status '{value}'")
            }
            Self::InvalidRole(value) => write!(f, "Unknown event role '{value}'"),
            Self::InvalidReminderKind(value) => {
                write!(f, "Unknown reminder kind '{value}'")
            }
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
