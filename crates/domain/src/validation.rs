// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Event;
use time::OffsetDateTime;

/// Maximum slot label length accepted by the system.
const MAX_LABEL_LENGTH: usize = 200;

/// Bounds for slot durations used in bulk generation, in minutes.
const MIN_SLOT_MINUTES: i64 = 5;
const MAX_SLOT_MINUTES: i64 = 480;

/// Validates that an event slug is non-empty and URL-safe.
///
/// Slugs appear in shared links and must consist solely of lowercase
/// ASCII letters, digits, and hyphens.
///
/// # Arguments
///
/// * `slug` - The slug to validate
///
/// # Errors
///
/// Returns an error if the slug is empty or contains a character outside
/// `[a-z0-9-]`.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::InvalidSlug(String::from(
            "Slug cannot be empty",
        )));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::InvalidSlug(format!(
            "Slug '{slug}' may only contain lowercase letters, digits, and hyphens"
        )));
    }

    Ok(())
}

/// Validates an event's basic field constraints.
///
/// This function checks fields in isolation. It does NOT check slug
/// uniqueness (that requires store context).
///
/// # Arguments
///
/// * `event` - The event to validate
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - The slug is empty or not URL-safe
/// - The timezone identifier is empty
/// - `max_signups_per_participant` is less than 1
pub fn validate_event_fields(event: &Event) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if event.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    validate_slug(&event.slug)?;

    // Rule: timezone identifier must not be empty
    if event.timezone.is_empty() {
        return Err(DomainError::InvalidTimezone(String::from(
            "Timezone cannot be empty",
        )));
    }

    // Rule: each participant must be allowed at least one signup
    if event.max_signups_per_participant < 1 {
        return Err(DomainError::InvalidMaxSignups {
            count: event.max_signups_per_participant,
        });
    }

    Ok(())
}

/// Validates that a slot's end time is strictly after its start time.
///
/// # Arguments
///
/// * `starts_at` - The slot's start timestamp
/// * `ends_at` - The slot's end timestamp
///
/// # Errors
///
/// Returns `DomainError::InvalidSlotTimes` if `ends_at <= starts_at`.
pub fn validate_slot_times(
    starts_at: OffsetDateTime,
    ends_at: OffsetDateTime,
) -> Result<(), DomainError> {
    if ends_at <= starts_at {
        return Err(DomainError::InvalidSlotTimes { starts_at, ends_at });
    }
    Ok(())
}

/// Validates a slot duration for bulk generation.
///
/// # Arguments
///
/// * `minutes` - The requested slot duration in minutes
///
/// # Errors
///
/// Returns an error if the duration is outside 5–480 minutes.
pub fn validate_slot_duration(minutes: i64) -> Result<(), DomainError> {
    if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&minutes) {
        return Err(DomainError::InvalidSlotDuration { minutes });
    }
    Ok(())
}

/// Validates an optional slot label's length.
///
/// # Arguments
///
/// * `label` - The label to validate, if any
///
/// # Errors
///
/// Returns an error if the label exceeds 200 characters.
pub fn validate_slot_label(label: Option<&str>) -> Result<(), DomainError> {
    if let Some(value) = label {
        let length: usize = value.chars().count();
        if length > MAX_LABEL_LENGTH {
            return Err(DomainError::InvalidSlotLabel { length });
        }
    }
    Ok(())
}

/// Validates a participant email address.
///
/// This is a shape check, not a deliverability check: the address must be
/// non-empty and contain exactly one `@` with text on both sides.
///
/// # Arguments
///
/// * `email` - The email address to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_contact(email: &str) -> Result<(), DomainError> {
    if email.trim().is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }

    let mut parts = email.split('@');
    let local: Option<&str> = parts.next();
    let domain: Option<&str> = parts.next();
    let extra: Option<&str> = parts.next();

    match (local, domain, extra) {
        (Some(l), Some(d), None) if !l.is_empty() && !d.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        ))),
    }
}
