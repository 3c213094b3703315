// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only audit types for the booking system.
//!
//! Every mutating workflow operation produces an [`AuditRecord`] naming the
//! actor, the action, and the touched resource. Records are written once and
//! never mutated or deleted.

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

/// The entity performing an audited action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Stable identifier (participant ID, or a system name for sweeps).
    id: String,
    /// Kind of actor: "participant", "organizer", or "system".
    actor_type: String,
}

impl Actor {
    /// Creates a new `Actor`.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Returns the actor's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the actor's type.
    #[must_use]
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }
}

/// The action performed, named by what it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Machine-readable action name, e.g. `booking_cancelled`.
    name: String,
    /// Optional human-readable or JSON details.
    details: Option<String>,
}

impl Action {
    /// Creates a new `Action`.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the action details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

/// A single append-only audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// Who performed the action.
    pub actor: Actor,
    /// What was done.
    pub action: Action,
    /// The event this record is scoped to, if any.
    pub event_id: Option<i64>,
    /// The kind of resource touched, e.g. `booking`, `slot`, `swap_request`.
    pub resource_type: String,
    /// The touched resource's identifier, if it exists yet.
    pub resource_id: Option<i64>,
}

impl AuditRecord {
    /// Creates a new `AuditRecord`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        event_id: Option<i64>,
        resource_type: String,
        resource_id: Option<i64>,
    ) -> Self {
        Self {
            actor,
            action,
            event_id,
            resource_type,
            resource_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_exposes_id_and_type() {
        let actor = Actor::new(String::from("42"), String::from("participant"));
        assert_eq!(actor.id(), "42");
        assert_eq!(actor.actor_type(), "participant");
    }

    #[test]
    fn action_details_are_optional() {
        let bare = Action::new(String::from("booking_created"), None);
        assert_eq!(bare.details(), None);

        let detailed = Action::new(
            String::from("booking_cancelled"),
            Some(String::from("{\"slot_id\":7}")),
        );
        assert_eq!(detailed.name(), "booking_cancelled");
        assert_eq!(detailed.details(), Some("{\"slot_id\":7}"));
    }

    #[test]
    fn record_carries_resource_scope() {
        let record = AuditRecord::new(
            Actor::new(String::from("42"), String::from("participant")),
            Action::new(String::from("swap_accepted"), None),
            Some(3),
            String::from("swap_request"),
            Some(9),
        );
        assert_eq!(record.event_id, Some(3));
        assert_eq!(record.resource_type, "swap_request");
        assert_eq!(record.resource_id, Some(9));
    }

    #[test]
    fn record_for_unpersisted_resource_has_no_id() {
        let record = AuditRecord::new(
            Actor::new(String::from("reminder-sweep"), String::from("system")),
            Action::new(String::from("reminders_sent"), None),
            None,
            String::from("booking"),
            None,
        );
        assert_eq!(record.resource_id, None);
        assert_eq!(record.event_id, None);
    }
}
