// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp storage format.
//!
//! Timestamps are stored as RFC 3339 `TEXT`, normalized to UTC at
//! whole-second precision. The normalization keeps lexicographic ordering
//! consistent with chronological ordering, so range filters on stored
//! columns compare correctly as strings.

use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Formats a timestamp into the canonical stored representation.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub(crate) fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    let normalized: OffsetDateTime = value
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| PersistenceError::TimestampError(e.to_string()))?;

    normalized
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::TimestampError(e.to_string()))
}

/// Parses a stored timestamp back into an [`OffsetDateTime`].
///
/// # Errors
///
/// Returns an error if the stored text is not valid RFC 3339.
pub(crate) fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| PersistenceError::TimestampError(format!("invalid timestamp {raw:?}: {e}")))
}

/// Parses an optional stored timestamp.
///
/// # Errors
///
/// Returns an error if a present value is not valid RFC 3339.
pub(crate) fn parse_optional_timestamp(
    raw: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    raw.map(parse_timestamp).transpose()
}
