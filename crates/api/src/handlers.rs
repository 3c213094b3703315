// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the booking workflows.
//!
//! Every handler follows the same shape: authorize, validate through the
//! core decision functions, mutate the store, append an audit record, then
//! dispatch best-effort notifications. Audit failures abort the request;
//! notification failures never do.

use std::collections::HashMap;

use slotbook_audit::{Action, Actor, AuditRecord};
use slotbook_core::{
    PlannedSlot, ReminderKind, plan_slots, promotion_candidate, resolve_signup,
    validate_swap_request, validate_swap_response,
};
use slotbook_domain::{
    Booking, BookingStatus, Event, EventRole, Slot, SwapRequest, SwapStatus,
    validate_contact, validate_event_fields, validate_slot_label, validate_slot_times,
    validate_slug,
};
use slotbook_persistence::{
    AuditEntryData, CompletedSignup, NewVerification, Persistence, PersistenceError,
};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error,
    translate_persistence_error};
use crate::notify::{Notifier, notify_contact};
use crate::request_response::{
    BookingView, CancellationResult, CreateEventRequest, CreateSlotRequest, CreateSwapRequest,
    DuplicateEventRequest, EventDetail, GenerateSlotsRequest, PendingSwaps, ReminderSweepReport,
    SignupOutcome, SignupRequest, SignupRequested, SlotView, SwapResolution, UpdateEventRequest,
};

/// How long a signup verification token stays redeemable.
const VERIFICATION_TTL: Duration = Duration::hours(1);

/// The audit actor used by unattended jobs.
fn sweep_actor() -> Actor {
    Actor::new(String::from("reminder-sweep"), String::from("system"))
}

/// The audit actor for an unauthenticated signer, identified by email.
fn signer_actor(email: &str) -> Actor {
    Actor::new(email.to_lowercase(), String::from("signer"))
}

/// Generates a single-use verification token: 128 bits of randomness,
/// hex encoded.
fn generate_verification_token() -> String {
    format!(
        "{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>()
    )
}

/// Appends an audit record, surfacing failures to the caller.
fn record_audit(
    persistence: &mut Persistence,
    actor: Actor,
    action: &str,
    details: Option<String>,
    event_id: i64,
    resource_type: &str,
    resource_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let record = AuditRecord::new(
        actor,
        Action::new(action.to_string(), details),
        Some(event_id),
        resource_type.to_string(),
        resource_id,
    );
    persistence
        .record_audit(&record, now)
        .map_err(translate_persistence_error)?;
    Ok(())
}

fn load_event(persistence: &mut Persistence, event_id: i64) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_persistence_error(PersistenceError::EventNotFound(event_id)))
}

fn load_slot(persistence: &mut Persistence, slot_id: i64) -> Result<Slot, ApiError> {
    persistence
        .get_slot(slot_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_persistence_error(PersistenceError::SlotNotFound(slot_id)))
}

fn load_booking(persistence: &mut Persistence, booking_id: i64) -> Result<Booking, ApiError> {
    persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_persistence_error(PersistenceError::BookingNotFound(booking_id)))
}

fn load_swap(persistence: &mut Persistence, swap_id: i64) -> Result<SwapRequest, ApiError> {
    persistence
        .get_swap(swap_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_persistence_error(PersistenceError::SwapNotFound(swap_id)))
}

/// Fetches the actor's role grant on an event, if any.
fn role_for(
    persistence: &mut Persistence,
    event_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Option<EventRole>, ApiError> {
    persistence
        .get_event_role(event_id, actor.participant_id())
        .map_err(translate_persistence_error)
}

// ============================================================================
// Events
// ============================================================================

/// Creates a new event owned by the actor.
///
/// # Errors
///
/// Returns an error if a field is invalid, the slug is already taken, or
/// the store write fails.
pub fn create_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateEventRequest,
    now: OffsetDateTime,
) -> Result<i64, ApiError> {
    let event = Event {
        event_id: None,
        title: request.title,
        description: request.description,
        slug: request.slug,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
        timezone: request.timezone,
        show_contact: request.show_contact,
        allow_swap: request.allow_swap,
        allow_waitlist: request.allow_waitlist,
        max_signups_per_participant: request.max_signups_per_participant,
        notify_email: request.notify_email,
        created_by: actor.participant_id(),
    };
    validate_event_fields(&event).map_err(translate_domain_error)?;

    if persistence
        .get_event_by_slug(&event.slug)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::Conflict {
            rule: String::from("unique_slug"),
            message: format!("An event with slug '{}' already exists", event.slug),
        });
    }

    let event_id: i64 = persistence
        .create_event(&event)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "event_created",
        None,
        event_id,
        "event",
        Some(event_id),
        now,
    )?;

    info!(event_id, "Event created");
    Ok(event_id)
}

/// Updates an event's settings. The slug is immutable.
///
/// # Errors
///
/// Returns an error if the event does not exist, the actor may not
/// manage it, or a field is invalid.
pub fn update_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: UpdateEventRequest,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let existing: Event = load_event(persistence, request.event_id)?;
    let role: Option<EventRole> = role_for(persistence, request.event_id, actor)?;
    AuthorizationService::authorize_event_management(actor, &existing, role)?;

    let updated = Event {
        event_id: existing.event_id,
        title: request.title,
        description: request.description,
        slug: existing.slug,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
        timezone: request.timezone,
        show_contact: request.show_contact,
        allow_swap: request.allow_swap,
        allow_waitlist: request.allow_waitlist,
        max_signups_per_participant: request.max_signups_per_participant,
        notify_email: request.notify_email,
        created_by: existing.created_by,
    };
    validate_event_fields(&updated).map_err(translate_domain_error)?;

    persistence
        .update_event(&updated)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "event_updated",
        None,
        request.event_id,
        "event",
        Some(request.event_id),
        now,
    )?;

    Ok(())
}

/// Duplicates an event: fields and slots are copied, shifted to the new
/// start time; bookings, waitlists, and swap requests are not.
///
/// # Errors
///
/// Returns an error if the source does not exist, the actor may not
/// manage it, the new slug is invalid or taken, or the copy fails.
pub fn duplicate_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: DuplicateEventRequest,
    now: OffsetDateTime,
) -> Result<i64, ApiError> {
    let source: Event = load_event(persistence, request.source_event_id)?;
    let role: Option<EventRole> = role_for(persistence, request.source_event_id, actor)?;
    AuthorizationService::authorize_event_management(actor, &source, role)?;

    validate_slug(&request.new_slug).map_err(translate_domain_error)?;
    if persistence
        .get_event_by_slug(&request.new_slug)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::Conflict {
            rule: String::from("unique_slug"),
            message: format!("An event with slug '{}' already exists", request.new_slug),
        });
    }

    let shift: Duration = request.starts_at - source.starts_at;
    let copy = Event {
        event_id: None,
        title: request.new_title,
        slug: request.new_slug,
        starts_at: request.starts_at,
        ends_at: source.ends_at.map(|t| t + shift),
        created_by: actor.participant_id(),
        ..source.clone()
    };
    validate_event_fields(&copy).map_err(translate_domain_error)?;

    let new_event_id: i64 = persistence
        .create_event(&copy)
        .map_err(translate_persistence_error)?;

    let slots: Vec<Slot> = persistence
        .list_slots_for_event(request.source_event_id)
        .map_err(translate_persistence_error)?;
    if !slots.is_empty() {
        let planned: Vec<PlannedSlot> = slots
            .into_iter()
            .map(|slot| PlannedSlot {
                starts_at: slot.starts_at + shift,
                ends_at: slot.ends_at + shift,
                label: slot.label,
                sort_order: slot.sort_order,
            })
            .collect();
        persistence
            .create_slots(new_event_id, &planned)
            .map_err(translate_persistence_error)?;
    }

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "event_duplicated",
        Some(serde_json::json!({ "source_event_id": request.source_event_id }).to_string()),
        new_event_id,
        "event",
        Some(new_event_id),
        now,
    )?;

    info!(new_event_id, source_event_id = request.source_event_id, "Event duplicated");
    Ok(new_event_id)
}

/// Lists all events, newest start first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(persistence: &mut Persistence) -> Result<Vec<Event>, ApiError> {
    persistence.list_events().map_err(translate_persistence_error)
}

/// Reads an event's public detail page by slug: every slot with its
/// confirmed booking (contact withheld when the event hides it) and
/// waitlist depth.
///
/// # Errors
///
/// Returns an error if no event has the slug or a query fails.
pub fn event_detail(persistence: &mut Persistence, slug: &str) -> Result<EventDetail, ApiError> {
    let event: Event = persistence
        .get_event_by_slug(slug)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_persistence_error(PersistenceError::EventSlugNotFound(slug.to_string()))
        })?;
    let event_id: i64 = event.event_id.unwrap_or(-1);

    let slots: Vec<Slot> = persistence
        .list_slots_for_event(event_id)
        .map_err(translate_persistence_error)?;
    let slot_ids: Vec<i64> = slots.iter().filter_map(|s| s.slot_id).collect();

    let mut holders: HashMap<i64, Booking> = persistence
        .confirmed_bookings_for_slots(&slot_ids)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|b| (b.slot_id, b))
        .collect();

    let mut waitlist_counts: HashMap<i64, usize> = HashMap::new();
    for entry in persistence
        .waitlist_for_event(event_id)
        .map_err(translate_persistence_error)?
    {
        *waitlist_counts.entry(entry.slot_id).or_insert(0) += 1;
    }

    let show_contact: bool = event.show_contact;
    let views: Vec<SlotView> = slots
        .into_iter()
        .map(|slot| {
            let slot_id: i64 = slot.slot_id.unwrap_or(-1);
            let booking: Option<BookingView> = holders.remove(&slot_id).map(|b| BookingView {
                booking_id: b.booking_id.unwrap_or(-1),
                status: b.status,
                contact: show_contact.then_some(b.contact),
                team_id: b.team_id,
            });
            let waitlist_count: usize = waitlist_counts.get(&slot_id).copied().unwrap_or(0);
            SlotView {
                slot,
                booking,
                waitlist_count,
            }
        })
        .collect();

    Ok(EventDetail {
        event,
        slots: views,
    })
}

// ============================================================================
// Slots
// ============================================================================

/// Creates a single slot, appended to the event's sort order.
///
/// # Errors
///
/// Returns an error if the event does not exist, the actor may not
/// manage it, the times or label are invalid, or the start time
/// collides with an existing slot.
pub fn create_slot(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateSlotRequest,
    now: OffsetDateTime,
) -> Result<i64, ApiError> {
    let event: Event = load_event(persistence, request.event_id)?;
    let role: Option<EventRole> = role_for(persistence, request.event_id, actor)?;
    AuthorizationService::authorize_event_management(actor, &event, role)?;

    validate_slot_times(request.starts_at, request.ends_at).map_err(translate_domain_error)?;
    validate_slot_label(request.label.as_deref()).map_err(translate_domain_error)?;

    let sort_order: i64 = persistence
        .max_sort_order(request.event_id)
        .map_err(translate_persistence_error)?
        .map_or(1, |max| max + 1);

    let slot = Slot::new(
        request.event_id,
        request.starts_at,
        request.ends_at,
        request.label,
        sort_order,
    );
    let slot_id: i64 = persistence
        .create_slot(&slot)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "slot_created",
        None,
        request.event_id,
        "slot",
        Some(slot_id),
        now,
    )?;

    Ok(slot_id)
}

/// Bulk-generates consecutive slots over a range.
///
/// # Errors
///
/// Returns an error if the event does not exist, the actor may not
/// manage it, the plan is invalid or empty, or any generated start time
/// collides with an existing slot (in which case nothing is created).
pub fn generate_slots(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: GenerateSlotsRequest,
    now: OffsetDateTime,
) -> Result<Vec<i64>, ApiError> {
    let event: Event = load_event(persistence, request.event_id)?;
    let role: Option<EventRole> = role_for(persistence, request.event_id, actor)?;
    AuthorizationService::authorize_event_management(actor, &event, role)?;

    let first_sort_order: i64 = persistence
        .max_sort_order(request.event_id)
        .map_err(translate_persistence_error)?
        .map_or(1, |max| max + 1);

    let planned: Vec<PlannedSlot> = plan_slots(
        request.range_start,
        request.range_end,
        request.duration_minutes,
        request.label_template.as_deref(),
        first_sort_order,
    )
    .map_err(translate_core_error)?;

    let slot_ids: Vec<i64> = persistence
        .create_slots(request.event_id, &planned)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "slots_generated",
        Some(serde_json::json!({ "count": slot_ids.len() }).to_string()),
        request.event_id,
        "slot",
        None,
        now,
    )?;

    info!(
        event_id = request.event_id,
        count = slot_ids.len(),
        "Slots generated"
    );
    Ok(slot_ids)
}

/// Deletes a slot. Any confirmed booking on it is cancelled, audited,
/// and notified before the row (and its dependents) are removed.
///
/// # Errors
///
/// Returns an error if the slot or event does not exist, the actor may
/// not manage the event, or a store write fails.
pub fn delete_slot(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    actor: &AuthenticatedActor,
    slot_id: i64,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let slot: Slot = load_slot(persistence, slot_id)?;
    let event: Event = load_event(persistence, slot.event_id)?;
    let role: Option<EventRole> = role_for(persistence, slot.event_id, actor)?;
    AuthorizationService::authorize_event_management(actor, &event, role)?;

    let displaced: Option<Booking> = persistence
        .confirmed_booking_for_slot(slot_id)
        .map_err(translate_persistence_error)?;

    if let Some(ref booking) = displaced {
        let booking_id: i64 = booking.booking_id.unwrap_or(-1);
        persistence
            .set_booking_status(booking_id, BookingStatus::Cancelled)
            .map_err(translate_persistence_error)?;
        record_audit(
            persistence,
            actor.to_audit_actor(),
            "booking_cancelled",
            Some(serde_json::json!({ "reason": "slot_deleted" }).to_string()),
            slot.event_id,
            "booking",
            Some(booking_id),
            now,
        )?;
    }

    persistence
        .delete_slot(slot_id)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "slot_deleted",
        None,
        slot.event_id,
        "slot",
        Some(slot_id),
        now,
    )?;

    if let Some(booking) = displaced {
        notify_contact(
            notifier,
            &booking.contact,
            &format!("Your slot for '{}' was removed", event.title),
            &format!(
                "The slot starting {} was removed by an organizer and your booking was cancelled.",
                slot.starts_at
            ),
        );
    }

    Ok(())
}

// ============================================================================
// Signups
// ============================================================================

/// Starts the two-step signup: validates the request, stores a
/// verification token, and emails the confirmation link.
///
/// The slot's availability is checked here only to fail fast; the
/// binding resolution happens when the token is redeemed.
///
/// # Errors
///
/// Returns an error if the event or slot does not exist, the contact is
/// invalid, the signer is at their signup limit, or the slot is taken
/// and waitlisting is unavailable.
pub fn request_signup(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    request: SignupRequest,
    now: OffsetDateTime,
) -> Result<SignupRequested, ApiError> {
    let event: Event = persistence
        .get_event_by_slug(&request.event_slug)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_persistence_error(PersistenceError::EventSlugNotFound(
                request.event_slug.clone(),
            ))
        })?;
    let event_id: i64 = event.event_id.unwrap_or(-1);

    let slot: Slot = load_slot(persistence, request.slot_id)?;
    validate_contact(&request.email).map_err(translate_domain_error)?;

    let held: i64 = persistence
        .count_confirmed_bookings_for_email(event_id, &request.email)
        .map_err(translate_persistence_error)?;
    if held >= event.max_signups_per_participant {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("signup_limit"),
            message: format!(
                "'{}' already holds {held} of {} allowed signups for this event",
                request.email.to_lowercase(),
                event.max_signups_per_participant
            ),
        });
    }

    let slot_taken: bool = persistence
        .confirmed_booking_for_slot(request.slot_id)
        .map_err(translate_persistence_error)?
        .is_some();
    let max_position: Option<i64> = persistence
        .max_waitlist_position(request.slot_id)
        .map_err(translate_persistence_error)?;
    // Fail fast; redemption re-resolves against fresh store state.
    resolve_signup(&slot, &event, slot_taken, request.join_waitlist, max_position)
        .map_err(translate_core_error)?;

    let token: String = generate_verification_token();
    let expires_at: OffsetDateTime = now + VERIFICATION_TTL;
    let verification = NewVerification {
        token: token.clone(),
        event_id,
        slot_id: request.slot_id,
        participant_email: request.email.clone(),
        participant_name: request.name,
        participant_phone: request.phone,
        team_name: request.team_name,
        user_id: request.user_id,
        join_waitlist: request.join_waitlist,
        expires_at,
    };
    let verification_id: i64 = persistence
        .create_verification(&verification)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        signer_actor(&request.email),
        "signup_requested",
        None,
        event_id,
        "slot",
        Some(request.slot_id),
        now,
    )?;

    crate::notify::notify_email(
        notifier,
        &request.email,
        &format!("Confirm your signup for '{}'", event.title),
        &format!(
            "Confirm your signup for the slot starting {} within one hour: /signup/confirm/{token}",
            slot.starts_at
        ),
    );

    debug!(verification_id, event_id, "Signup verification issued");
    Ok(SignupRequested {
        verification_id,
        token,
        expires_at,
    })
}

/// Redeems a signup verification token, producing a confirmed booking or
/// a waitlist entry.
///
/// # Errors
///
/// Returns an error if the token is unknown, expired, or already used,
/// or if the slot is taken and the signer declined the waitlist.
pub fn complete_signup(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    token: &str,
    now: OffsetDateTime,
) -> Result<SignupOutcome, ApiError> {
    let completed: CompletedSignup = persistence
        .complete_verification(token, now)
        .map_err(translate_persistence_error)?;

    match completed {
        CompletedSignup::Booked { booking_id } => {
            let booking: Booking = load_booking(persistence, booking_id)?;
            let slot: Slot = load_slot(persistence, booking.slot_id)?;
            record_audit(
                persistence,
                signer_actor(&booking.contact.email),
                "booking_created",
                None,
                booking.event_id,
                "booking",
                Some(booking_id),
                now,
            )?;
            notify_contact(
                notifier,
                &booking.contact,
                "Your slot is booked",
                &format!("Your booking for the slot starting {} is confirmed.", slot.starts_at),
            );
            Ok(SignupOutcome::Booked { booking_id })
        }
        CompletedSignup::Waitlisted {
            waitlist_id,
            position,
        } => {
            let entry = persistence
                .get_waitlist_entry(waitlist_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| {
                    translate_persistence_error(PersistenceError::WaitlistEntryNotFound(
                        waitlist_id,
                    ))
                })?;
            record_audit(
                persistence,
                signer_actor(&entry.contact.email),
                "waitlist_joined",
                Some(serde_json::json!({ "position": position }).to_string()),
                entry.event_id,
                "waitlist_entry",
                Some(waitlist_id),
                now,
            )?;
            notify_contact(
                notifier,
                &entry.contact,
                "You are on the waitlist",
                &format!("The slot is taken; you hold waitlist position {position}."),
            );
            Ok(SignupOutcome::Waitlisted {
                waitlist_id,
                position,
            })
        }
    }
}

// ============================================================================
// Cancellation & waitlist promotion
// ============================================================================

/// Cancels a booking and promotes the slot's lowest-position waitlist
/// entry, if any.
///
/// Promotion is best-effort: if the promotion insert loses to a fresh
/// direct signup it is abandoned and the entry stays queued for the next
/// cancellation.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is not confirmed, or
/// the actor is neither its owner nor an event manager.
pub fn cancel_booking(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    actor: &AuthenticatedActor,
    booking_id: i64,
    now: OffsetDateTime,
) -> Result<CancellationResult, ApiError> {
    let booking: Booking = load_booking(persistence, booking_id)?;
    let event: Event = load_event(persistence, booking.event_id)?;
    let role: Option<EventRole> = role_for(persistence, booking.event_id, actor)?;
    AuthorizationService::authorize_booking_cancellation(actor, &event, &booking, role)?;

    if !booking.status.is_active() {
        return Err(ApiError::Conflict {
            rule: String::from("booking_active"),
            message: format!("Booking {booking_id} is already cancelled"),
        });
    }

    persistence
        .set_booking_status(booking_id, BookingStatus::Cancelled)
        .map_err(translate_persistence_error)?;
    record_audit(
        persistence,
        actor.to_audit_actor(),
        "booking_cancelled",
        None,
        booking.event_id,
        "booking",
        Some(booking_id),
        now,
    )?;

    let promoted_booking_id: Option<i64> =
        promote_next_in_line(persistence, notifier, &booking, now)?;

    notify_contact(
        notifier,
        &booking.contact,
        &format!("Your booking for '{}' was cancelled", event.title),
        "Your booking was cancelled. The slot has been released.",
    );

    Ok(CancellationResult {
        booking_id,
        promoted_booking_id,
    })
}

/// Promotes the lowest-position waitlist entry on a just-released slot.
///
/// Returns the new booking's ID, or `None` when the waitlist is empty or
/// the promotion lost to a concurrent direct signup.
fn promote_next_in_line(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    released: &Booking,
    now: OffsetDateTime,
) -> Result<Option<i64>, ApiError> {
    let queue = persistence
        .waitlist_for_slot(released.slot_id)
        .map_err(translate_persistence_error)?;
    let Some(entry) = promotion_candidate(&queue).cloned() else {
        return Ok(None);
    };
    let waitlist_id: i64 = entry.waitlist_id.unwrap_or(-1);

    let promoted = Booking {
        booking_id: None,
        slot_id: entry.slot_id,
        event_id: entry.event_id,
        team_id: entry.team_id,
        contact: entry.contact.clone(),
        user_id: entry.user_id,
        status: BookingStatus::Confirmed,
    };

    match persistence.insert_confirmed_booking(&promoted) {
        Ok(new_booking_id) => {
            persistence
                .delete_waitlist_entry(waitlist_id)
                .map_err(translate_persistence_error)?;
            record_audit(
                persistence,
                promotion_actor(),
                "waitlist_promoted",
                Some(serde_json::json!({ "waitlist_id": waitlist_id }).to_string()),
                entry.event_id,
                "booking",
                Some(new_booking_id),
                now,
            )?;
            notify_contact(
                notifier,
                &entry.contact,
                "A slot opened up for you",
                "A cancellation freed your slot and your waitlist entry was promoted to a booking.",
            );
            Ok(Some(new_booking_id))
        }
        // Lost to a fresh direct signup; the entry stays queued.
        Err(PersistenceError::ConfirmedBookingExists { slot_id }) => {
            debug!(slot_id, waitlist_id, "Waitlist promotion abandoned");
            Ok(None)
        }
        Err(err) => Err(translate_persistence_error(err)),
    }
}

/// The audit actor for system-driven waitlist promotions.
fn promotion_actor() -> Actor {
    Actor::new(String::from("waitlist-promotion"), String::from("system"))
}

// ============================================================================
// Swaps
// ============================================================================

/// Creates a swap request from the actor's booking to another confirmed
/// booking in the same event.
///
/// # Errors
///
/// Returns an error if either booking does not exist, the actor does not
/// own the requester booking, or a swap rule is violated.
pub fn request_swap(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    actor: &AuthenticatedActor,
    request: CreateSwapRequest,
    now: OffsetDateTime,
) -> Result<i64, ApiError> {
    let requester: Booking = load_booking(persistence, request.requester_booking_id)?;
    let target: Booking = load_booking(persistence, request.target_booking_id)?;
    let event: Event = load_event(persistence, requester.event_id)?;

    AuthorizationService::authorize_swap_request(actor, &requester)?;

    let has_pending: bool = persistence
        .has_pending_swap(request.requester_booking_id, request.target_booking_id)
        .map_err(translate_persistence_error)?;
    validate_swap_request(&event, &requester, &target, has_pending)
        .map_err(translate_core_error)?;

    let swap_id: i64 = persistence
        .create_swap_request(
            requester.event_id,
            request.requester_booking_id,
            request.target_booking_id,
        )
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "swap_requested",
        Some(
            serde_json::json!({
                "requester_booking_id": request.requester_booking_id,
                "target_booking_id": request.target_booking_id,
            })
            .to_string(),
        ),
        requester.event_id,
        "swap_request",
        Some(swap_id),
        now,
    )?;

    notify_contact(
        notifier,
        &target.contact,
        &format!("Slot swap requested for '{}'", event.title),
        "Another participant asked to swap slots with you. Accept or decline from the event page.",
    );

    Ok(swap_id)
}

/// Responds to a swap request as the target booking's owner.
///
/// Acceptance exchanges the two bookings' slots atomically; decline
/// records the refusal and changes nothing else. Both parties are
/// notified, acceptance with post-exchange slot details.
///
/// # Errors
///
/// Returns an error if the swap or either booking does not exist, the
/// actor does not own the target booking, the request is no longer
/// pending, or (on accept) either booking is no longer confirmed.
pub fn respond_to_swap(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    actor: &AuthenticatedActor,
    swap_id: i64,
    accept: bool,
    now: OffsetDateTime,
) -> Result<SwapResolution, ApiError> {
    let swap: SwapRequest = load_swap(persistence, swap_id)?;
    let requester: Booking = load_booking(persistence, swap.requester_booking_id)?;
    let target: Booking = load_booking(persistence, swap.target_booking_id)?;
    let event: Event = load_event(persistence, swap.event_id)?;

    AuthorizationService::authorize_swap_response(actor, &target)?;
    validate_swap_response(&swap, &requester, &target, accept).map_err(translate_core_error)?;

    let status: SwapStatus = if accept {
        persistence
            .accept_swap(swap_id, now)
            .map_err(translate_persistence_error)?;
        record_audit(
            persistence,
            actor.to_audit_actor(),
            "swap_accepted",
            None,
            swap.event_id,
            "swap_request",
            Some(swap_id),
            now,
        )?;

        // Post-exchange positions for the notifications.
        let requester_after: Booking = load_booking(persistence, swap.requester_booking_id)?;
        let target_after: Booking = load_booking(persistence, swap.target_booking_id)?;
        let requester_slot: Slot = load_slot(persistence, requester_after.slot_id)?;
        let target_slot: Slot = load_slot(persistence, target_after.slot_id)?;
        notify_contact(
            notifier,
            &requester_after.contact,
            &format!("Swap accepted for '{}'", event.title),
            &format!("Your swap was accepted. Your slot now starts {}.", requester_slot.starts_at),
        );
        notify_contact(
            notifier,
            &target_after.contact,
            &format!("Swap completed for '{}'", event.title),
            &format!("You accepted the swap. Your slot now starts {}.", target_slot.starts_at),
        );
        SwapStatus::Accepted
    } else {
        persistence
            .resolve_swap(swap_id, SwapStatus::Declined, now)
            .map_err(translate_persistence_error)?;
        record_audit(
            persistence,
            actor.to_audit_actor(),
            "swap_declined",
            None,
            swap.event_id,
            "swap_request",
            Some(swap_id),
            now,
        )?;
        notify_contact(
            notifier,
            &requester.contact,
            &format!("Swap declined for '{}'", event.title),
            "The other participant declined your swap request.",
        );
        SwapStatus::Declined
    };

    Ok(SwapResolution { swap_id, status })
}

/// Lists pending swap requests involving any of the actor's bookings in
/// an event, on either side.
///
/// # Errors
///
/// Returns an error if the event does not exist or a query fails.
pub fn list_pending_swaps(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
) -> Result<PendingSwaps, ApiError> {
    load_event(persistence, event_id)?;

    let booking_ids: Vec<i64> = persistence
        .list_bookings_for_event(event_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|b| actor.owns_booking(b))
        .filter_map(|b| b.booking_id)
        .collect();

    let swaps: Vec<SwapRequest> = persistence
        .pending_swaps_for_bookings(&booking_ids)
        .map_err(translate_persistence_error)?;
    Ok(PendingSwaps { swaps })
}

// ============================================================================
// Reminder sweep
// ============================================================================

/// Sweeps the reminder windows, sending at most one reminder per
/// (booking, window).
///
/// Safe to re-invoke at any cadence: the widened windows overlap sweep
/// runs and the persisted dedup record suppresses repeats.
///
/// # Errors
///
/// Returns an error if a store read or write fails; notification
/// failures are logged and do not fail the sweep.
pub fn run_reminder_sweep(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    now: OffsetDateTime,
) -> Result<ReminderSweepReport, ApiError> {
    let mut report = ReminderSweepReport::default();
    let mut per_event: HashMap<i64, usize> = HashMap::new();

    for kind in ReminderKind::ALL {
        let (from, to) = kind.window(now);
        let slots: Vec<Slot> = persistence
            .slots_starting_between(from, to)
            .map_err(translate_persistence_error)?;
        let starts: HashMap<i64, OffsetDateTime> = slots
            .iter()
            .filter_map(|s| s.slot_id.map(|id| (id, s.starts_at)))
            .collect();
        let slot_ids: Vec<i64> = starts.keys().copied().collect();

        for booking in persistence
            .confirmed_bookings_for_slots(&slot_ids)
            .map_err(translate_persistence_error)?
        {
            let booking_id: i64 = booking.booking_id.unwrap_or(-1);
            let fresh: bool = persistence
                .record_reminder_sent(booking_id, kind, now)
                .map_err(translate_persistence_error)?;
            if !fresh {
                report.skipped += 1;
                continue;
            }

            let starts_at = starts.get(&booking.slot_id).copied();
            notify_contact(
                notifier,
                &booking.contact,
                "Upcoming slot reminder",
                &starts_at.map_or_else(
                    || format!("Reminder: your slot starts {}.", kind.when_label()),
                    |at| format!("Reminder ({}): your slot starts at {at}.", kind.when_label()),
                ),
            );
            report.sent += 1;
            *per_event.entry(booking.event_id).or_insert(0) += 1;
        }
    }

    for (event_id, count) in per_event {
        record_audit(
            persistence,
            sweep_actor(),
            "reminders_sent",
            Some(serde_json::json!({ "count": count }).to_string()),
            event_id,
            "booking",
            None,
            now,
        )?;
    }

    info!(sent = report.sent, skipped = report.skipped, "Reminder sweep finished");
    Ok(report)
}

// ============================================================================
// Audit log
// ============================================================================

/// Reads an event's audit log, oldest entry first.
///
/// # Errors
///
/// Returns an error if the event does not exist or the actor has no
/// organizer-side access to it.
pub fn event_audit_log(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
) -> Result<Vec<AuditEntryData>, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let role: Option<EventRole> = role_for(persistence, event_id, actor)?;
    AuthorizationService::authorize_audit_read(actor, &event, role)?;

    persistence
        .audit_for_event(event_id)
        .map_err(translate_persistence_error)
}

/// Grants a role on an event; only the owner or an admin may grant.
///
/// # Errors
///
/// Returns an error if the event does not exist or the actor is neither
/// the owner nor an event admin.
pub fn grant_role(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
    participant_id: i64,
    role: EventRole,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let actor_role: Option<EventRole> = role_for(persistence, event_id, actor)?;
    if event.created_by != actor.participant_id() && actor_role != Some(EventRole::Admin) {
        return Err(ApiError::Unauthorized {
            action: String::from("grant_role"),
            required_role: String::from("admin"),
        });
    }

    persistence
        .grant_event_role(event_id, participant_id, role)
        .map_err(translate_persistence_error)?;

    record_audit(
        persistence,
        actor.to_audit_actor(),
        "role_granted",
        Some(serde_json::json!({ "role": role.as_str() }).to_string()),
        event_id,
        "event_role",
        Some(participant_id),
        now,
    )?;

    Ok(())
}
