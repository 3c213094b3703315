// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use session::SessionParticipant;
use slotbook_api::{
    ApiError, AuthError, AuthenticationService, BookingView, CancellationResult, CreateEventRequest,
    CreateSlotRequest, CreateSwapRequest, DuplicateEventRequest, EventDetail, GenerateSlotsRequest,
    LogNotifier, ReminderSweepReport, SignupOutcome, SignupRequest, SignupRequested, SlotView,
    SwapResolution, UpdateEventRequest,
};
use slotbook_domain::{Event, EventRole, SwapRequest as DomainSwapRequest};
use slotbook_persistence::{AuditEntryData, Persistence};
use std::str::FromStr;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Slotbook Server - HTTP server for the Slotbook booking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Shared secret required to trigger a reminder sweep. The sweep
    /// endpoint is disabled when unset.
    #[arg(long)]
    reminder_secret: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer behind a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Shared secret guarding the reminder sweep endpoint.
    reminder_secret: Option<String>,
}

/// API request for registering a participant account.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterApiRequest {
    /// The account email address.
    email: String,
    /// The account password.
    password: String,
    /// Optional display name.
    display_name: Option<String>,
}

/// API response after registering a participant account.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterApiResponse {
    /// The new participant's identifier.
    participant_id: i64,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The account email address.
    email: String,
    /// The account password.
    password: String,
}

/// API response after logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiResponse {
    /// The opaque session token for subsequent requests.
    token: String,
}

/// API request for creating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEventApiRequest {
    /// The event title.
    title: String,
    /// Optional free-form description.
    description: Option<String>,
    /// URL-safe unique identifier used in shared links.
    slug: String,
    /// When the event begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    /// When the event ends, if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    ends_at: Option<OffsetDateTime>,
    /// IANA timezone identifier.
    timezone: String,
    /// Whether booked slots display participant contact details.
    show_contact: bool,
    /// Whether participants may request slot swaps.
    allow_swap: bool,
    /// Whether full slots accept waitlist entries.
    allow_waitlist: bool,
    /// Maximum confirmed bookings a single participant may hold.
    max_signups_per_participant: i64,
    /// Address notified when a participant can't find a slot.
    notify_email: Option<String>,
}

/// API request for updating an event. The slug is immutable and absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateEventApiRequest {
    /// The event title.
    title: String,
    /// Optional free-form description.
    description: Option<String>,
    /// When the event begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    /// When the event ends, if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    ends_at: Option<OffsetDateTime>,
    /// IANA timezone identifier.
    timezone: String,
    /// Whether booked slots display participant contact details.
    show_contact: bool,
    /// Whether participants may request slot swaps.
    allow_swap: bool,
    /// Whether full slots accept waitlist entries.
    allow_waitlist: bool,
    /// Maximum confirmed bookings a single participant may hold.
    max_signups_per_participant: i64,
    /// Address notified when a participant can't find a slot.
    notify_email: Option<String>,
}

/// API request for duplicating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DuplicateEventApiRequest {
    /// The new event's slug.
    new_slug: String,
    /// The new event's title.
    new_title: String,
    /// When the new event begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
}

/// API request for creating a single slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSlotApiRequest {
    /// When the slot begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    /// When the slot ends.
    #[serde(with = "time::serde::rfc3339")]
    ends_at: OffsetDateTime,
    /// Optional display label.
    label: Option<String>,
}

/// API request for bulk-generating slots over a range.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GenerateSlotsApiRequest {
    /// Start of the generation range.
    #[serde(with = "time::serde::rfc3339")]
    range_start: OffsetDateTime,
    /// End of the generation range.
    #[serde(with = "time::serde::rfc3339")]
    range_end: OffsetDateTime,
    /// Length of each slot in minutes.
    duration_minutes: i64,
    /// Optional label template; `{{n}}` is the 1-based slot number.
    label_template: Option<String>,
}

/// API request for starting the two-step signup.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SignupApiRequest {
    /// The slot being claimed.
    slot_id: i64,
    /// Contact email for the signup.
    email: String,
    /// Optional display name.
    name: Option<String>,
    /// Optional phone number for SMS notifications.
    phone: Option<String>,
    /// Optional team name.
    team_name: Option<String>,
    /// Whether to join the waitlist if the slot is taken.
    join_waitlist: bool,
}

/// API request for creating a swap request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SwapApiRequest {
    /// The booking offered by the requester.
    requester_booking_id: i64,
    /// The booking the requester wants.
    target_booking_id: i64,
}

/// API request for answering a swap request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SwapRespondApiRequest {
    /// Whether the target holder accepts the exchange.
    accept: bool,
}

/// API request for granting an event role.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GrantRoleApiRequest {
    /// The participant receiving the role.
    participant_id: i64,
    /// The role name: admin, coordinator, viewer, or participant.
    role: String,
}

/// API response for write operations without a richer payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// The identifier of the created resource, if one was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

/// Serializable representation of an event for JSON responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EventResponse {
    /// The event identifier.
    event_id: Option<i64>,
    /// The event title.
    title: String,
    /// Optional free-form description.
    description: Option<String>,
    /// URL-safe unique identifier.
    slug: String,
    /// When the event begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    /// When the event ends, if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    ends_at: Option<OffsetDateTime>,
    /// IANA timezone identifier.
    timezone: String,
    /// Whether booked slots display participant contact details.
    show_contact: bool,
    /// Whether participants may request slot swaps.
    allow_swap: bool,
    /// Whether full slots accept waitlist entries.
    allow_waitlist: bool,
    /// Maximum confirmed bookings a single participant may hold.
    max_signups_per_participant: i64,
}

/// A booked slot's holder as shown on the public detail page.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookingViewResponse {
    /// The booking identifier.
    booking_id: i64,
    /// The booking status.
    status: String,
    /// Contact email, withheld when the event hides contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Contact display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// A slot with its occupancy as shown on the public detail page.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SlotViewResponse {
    /// The slot identifier.
    slot_id: Option<i64>,
    /// When the slot begins.
    #[serde(with = "time::serde::rfc3339")]
    starts_at: OffsetDateTime,
    /// When the slot ends.
    #[serde(with = "time::serde::rfc3339")]
    ends_at: OffsetDateTime,
    /// Optional display label.
    label: Option<String>,
    /// Position in the event's slot ordering.
    sort_order: i64,
    /// The confirmed booking holding this slot, if any.
    booking: Option<BookingViewResponse>,
    /// Number of waitlist entries queued behind this slot.
    waitlist_count: usize,
}

/// API response for the public event detail page.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EventDetailApiResponse {
    /// The event settings.
    event: EventResponse,
    /// Its slots in display order.
    slots: Vec<SlotViewResponse>,
}

/// API response after a signup request was accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SignupRequestedApiResponse {
    /// The stored verification row.
    verification_id: i64,
    /// The single-use confirmation token.
    token: String,
    /// When the token stops working.
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
}

/// API response after a signup verification was completed.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SignupOutcomeApiResponse {
    /// Either `booked` or `waitlisted`.
    outcome: String,
    /// The new booking, when booked.
    #[serde(skip_serializing_if = "Option::is_none")]
    booking_id: Option<i64>,
    /// The new waitlist entry, when waitlisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    waitlist_id: Option<i64>,
    /// The waitlist position, when waitlisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<i64>,
}

/// API response after cancelling a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CancellationApiResponse {
    /// The cancelled booking.
    booking_id: i64,
    /// The booking created by waitlist promotion, if one happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    promoted_booking_id: Option<i64>,
}

/// Serializable representation of a swap request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SwapRequestResponse {
    /// The swap request identifier.
    swap_id: Option<i64>,
    /// The event both bookings belong to.
    event_id: i64,
    /// The booking offered by the requester.
    requester_booking_id: i64,
    /// The booking the requester wants.
    target_booking_id: i64,
    /// The request status.
    status: String,
}

/// API response after answering a swap request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SwapResolutionApiResponse {
    /// The swap request.
    swap_id: i64,
    /// Its status after the response.
    status: String,
}

/// API response listing a participant's pending swap requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PendingSwapsApiResponse {
    /// Pending requests where the participant is requester or target.
    swaps: Vec<SwapRequestResponse>,
}

/// Serializable representation of an audit log entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AuditEntryResponse {
    /// The entry identifier.
    audit_id: i64,
    /// Who performed the action.
    actor_id: String,
    /// The actor category.
    actor_type: String,
    /// The action name.
    action: String,
    /// The affected resource category.
    resource_type: String,
    /// The affected resource, if one is identified.
    resource_id: Option<i64>,
    /// Optional JSON details.
    details: Option<String>,
    /// When the entry was recorded.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

/// API response summarizing a reminder sweep run.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SweepReportApiResponse {
    /// Reminders sent on this run.
    sent: usize,
    /// Bookings skipped because their reminder was already recorded.
    skipped: usize,
}

/// Error response type.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailure { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed in the store layer");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        let status: StatusCode = match &err {
            AuthError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Converts an `Event` to an `EventResponse`.
fn event_to_response(event: &Event) -> EventResponse {
    EventResponse {
        event_id: event.event_id,
        title: event.title.clone(),
        description: event.description.clone(),
        slug: event.slug.clone(),
        starts_at: event.starts_at,
        ends_at: event.ends_at,
        timezone: event.timezone.clone(),
        show_contact: event.show_contact,
        allow_swap: event.allow_swap,
        allow_waitlist: event.allow_waitlist,
        max_signups_per_participant: event.max_signups_per_participant,
    }
}

/// Converts an `EventDetail` to its wire representation.
fn detail_to_response(detail: &EventDetail) -> EventDetailApiResponse {
    let slots: Vec<SlotViewResponse> = detail
        .slots
        .iter()
        .map(|view: &SlotView| SlotViewResponse {
            slot_id: view.slot.slot_id,
            starts_at: view.slot.starts_at,
            ends_at: view.slot.ends_at,
            label: view.slot.label.clone(),
            sort_order: view.slot.sort_order,
            booking: view.booking.as_ref().map(|b: &BookingView| BookingViewResponse {
                booking_id: b.booking_id,
                status: b.status.to_string(),
                email: b.contact.as_ref().map(|c| c.email.clone()),
                name: b.contact.as_ref().and_then(|c| c.name.clone()),
            }),
            waitlist_count: view.waitlist_count,
        })
        .collect();

    EventDetailApiResponse {
        event: event_to_response(&detail.event),
        slots,
    }
}

/// Converts a domain swap request to its wire representation.
fn swap_to_response(swap: &DomainSwapRequest) -> SwapRequestResponse {
    SwapRequestResponse {
        swap_id: swap.swap_id,
        event_id: swap.event_id,
        requester_booking_id: swap.requester_booking_id,
        target_booking_id: swap.target_booking_id,
        status: swap.status.to_string(),
    }
}

/// Converts an audit entry to its wire representation.
fn audit_to_response(entry: &AuditEntryData) -> AuditEntryResponse {
    AuditEntryResponse {
        audit_id: entry.audit_id,
        actor_id: entry.actor_id.clone(),
        actor_type: entry.actor_type.clone(),
        action: entry.action.clone(),
        resource_type: entry.resource_type.clone(),
        resource_id: entry.resource_id,
        details: entry.details.clone(),
        created_at: entry.created_at,
    }
}

/// Handler for POST `/auth/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<Json<RegisterApiResponse>, HttpError> {
    info!(email = %req.email, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let participant_id: i64 = AuthenticationService::register(
        &mut persistence,
        &req.email,
        &req.password,
        req.display_name.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(RegisterApiResponse { participant_id }))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginApiResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (token, _actor) = AuthenticationService::login(
        &mut persistence,
        &req.email,
        &req.password,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(LoginApiResponse { token }))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    let token: &str = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
        })?;

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Logged out")),
        id: None,
    }))
}

/// Handler for GET `/events`.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<EventResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<Event> = slotbook_api::list_events(&mut persistence)?;
    drop(persistence);

    Ok(Json(events.iter().map(event_to_response).collect()))
}

/// Handler for POST `/events`.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(slug = %req.slug, participant_id = actor.participant_id(), "Handling create_event request");

    let request: CreateEventRequest = CreateEventRequest {
        title: req.title,
        description: req.description,
        slug: req.slug,
        starts_at: req.starts_at,
        ends_at: req.ends_at,
        timezone: req.timezone,
        show_contact: req.show_contact,
        allow_swap: req.allow_swap,
        allow_waitlist: req.allow_waitlist,
        max_signups_per_participant: req.max_signups_per_participant,
        notify_email: req.notify_email,
    };

    let mut persistence = app_state.persistence.lock().await;
    let event_id: i64 = slotbook_api::create_event(
        &mut persistence,
        &actor,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Event created")),
        id: Some(event_id),
    }))
}

/// Handler for PUT `/events/{event_id}`.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
    Json(req): Json<UpdateEventApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(event_id, participant_id = actor.participant_id(), "Handling update_event request");

    let request: UpdateEventRequest = UpdateEventRequest {
        event_id,
        title: req.title,
        description: req.description,
        starts_at: req.starts_at,
        ends_at: req.ends_at,
        timezone: req.timezone,
        show_contact: req.show_contact,
        allow_swap: req.allow_swap,
        allow_waitlist: req.allow_waitlist,
        max_signups_per_participant: req.max_signups_per_participant,
        notify_email: req.notify_email,
    };

    let mut persistence = app_state.persistence.lock().await;
    slotbook_api::update_event(&mut persistence, &actor, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Event updated")),
        id: Some(event_id),
    }))
}

/// Handler for POST `/events/{event_id}/duplicate`.
async fn handle_duplicate_event(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
    Json(req): Json<DuplicateEventApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(event_id, new_slug = %req.new_slug, "Handling duplicate_event request");

    let request: DuplicateEventRequest = DuplicateEventRequest {
        source_event_id: event_id,
        new_slug: req.new_slug,
        new_title: req.new_title,
        starts_at: req.starts_at,
    };

    let mut persistence = app_state.persistence.lock().await;
    let copy_id: i64 = slotbook_api::duplicate_event(
        &mut persistence,
        &actor,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Event duplicated")),
        id: Some(copy_id),
    }))
}

/// Handler for GET `/public/events/{slug}`.
async fn handle_event_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetailApiResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EventDetail = slotbook_api::event_detail(&mut persistence, &slug)?;
    drop(persistence);

    Ok(Json(detail_to_response(&detail)))
}

/// Handler for POST `/events/{event_id}/slots`.
async fn handle_create_slot(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
    Json(req): Json<CreateSlotApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(event_id, "Handling create_slot request");

    let request: CreateSlotRequest = CreateSlotRequest {
        event_id,
        starts_at: req.starts_at,
        ends_at: req.ends_at,
        label: req.label,
    };

    let mut persistence = app_state.persistence.lock().await;
    let slot_id: i64 =
        slotbook_api::create_slot(&mut persistence, &actor, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Slot created")),
        id: Some(slot_id),
    }))
}

/// Handler for POST `/events/{event_id}/slots/generate`.
async fn handle_generate_slots(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
    Json(req): Json<GenerateSlotsApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(event_id, duration_minutes = req.duration_minutes, "Handling generate_slots request");

    let request: GenerateSlotsRequest = GenerateSlotsRequest {
        event_id,
        range_start: req.range_start,
        range_end: req.range_end,
        duration_minutes: req.duration_minutes,
        label_template: req.label_template,
    };

    let mut persistence = app_state.persistence.lock().await;
    let slot_ids: Vec<i64> = slotbook_api::generate_slots(
        &mut persistence,
        &actor,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    let count: usize = slot_ids.len();
    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Generated {count} slots")),
        id: None,
    }))
}

/// Handler for DELETE `/slots/{slot_id}`.
async fn handle_delete_slot(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(slot_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(slot_id, "Handling delete_slot request");

    let mut persistence = app_state.persistence.lock().await;
    slotbook_api::delete_slot(
        &mut persistence,
        &LogNotifier,
        &actor,
        slot_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Slot deleted")),
        id: None,
    }))
}

/// Handler for POST `/public/events/{slug}/signups`.
async fn handle_request_signup(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<SignupApiRequest>,
) -> Result<Json<SignupRequestedApiResponse>, HttpError> {
    info!(slug = %slug, slot_id = req.slot_id, "Handling signup request");

    let request: SignupRequest = SignupRequest {
        event_slug: slug,
        slot_id: req.slot_id,
        email: req.email,
        name: req.name,
        phone: req.phone,
        team_name: req.team_name,
        join_waitlist: req.join_waitlist,
        user_id: None,
    };

    let mut persistence = app_state.persistence.lock().await;
    let requested: SignupRequested = slotbook_api::request_signup(
        &mut persistence,
        &LogNotifier,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(SignupRequestedApiResponse {
        verification_id: requested.verification_id,
        token: requested.token,
        expires_at: requested.expires_at,
    }))
}

/// Handler for POST `/public/signups/confirm/{token}`.
async fn handle_complete_signup(
    AxumState(app_state): AxumState<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SignupOutcomeApiResponse>, HttpError> {
    info!("Handling signup confirmation request");

    let mut persistence = app_state.persistence.lock().await;
    let outcome: SignupOutcome = slotbook_api::complete_signup(
        &mut persistence,
        &LogNotifier,
        &token,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    let response: SignupOutcomeApiResponse = match outcome {
        SignupOutcome::Booked { booking_id } => SignupOutcomeApiResponse {
            outcome: String::from("booked"),
            booking_id: Some(booking_id),
            waitlist_id: None,
            position: None,
        },
        SignupOutcome::Waitlisted {
            waitlist_id,
            position,
        } => SignupOutcomeApiResponse {
            outcome: String::from("waitlisted"),
            booking_id: None,
            waitlist_id: Some(waitlist_id),
            position: Some(position),
        },
    };

    Ok(Json(response))
}

/// Handler for DELETE `/bookings/{booking_id}`.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(booking_id): Path<i64>,
) -> Result<Json<CancellationApiResponse>, HttpError> {
    info!(booking_id, "Handling cancel_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let result: CancellationResult = slotbook_api::cancel_booking(
        &mut persistence,
        &LogNotifier,
        &actor,
        booking_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(CancellationApiResponse {
        booking_id: result.booking_id,
        promoted_booking_id: result.promoted_booking_id,
    }))
}

/// Handler for POST `/swaps`.
async fn handle_request_swap(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Json(req): Json<SwapApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        requester_booking_id = req.requester_booking_id,
        target_booking_id = req.target_booking_id,
        "Handling request_swap request"
    );

    let request: CreateSwapRequest = CreateSwapRequest {
        requester_booking_id: req.requester_booking_id,
        target_booking_id: req.target_booking_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let swap_id: i64 = slotbook_api::request_swap(
        &mut persistence,
        &LogNotifier,
        &actor,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Swap requested")),
        id: Some(swap_id),
    }))
}

/// Handler for POST `/swaps/{swap_id}/respond`.
async fn handle_respond_to_swap(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(swap_id): Path<i64>,
    Json(req): Json<SwapRespondApiRequest>,
) -> Result<Json<SwapResolutionApiResponse>, HttpError> {
    info!(swap_id, accept = req.accept, "Handling respond_to_swap request");

    let mut persistence = app_state.persistence.lock().await;
    let resolution: SwapResolution = slotbook_api::respond_to_swap(
        &mut persistence,
        &LogNotifier,
        &actor,
        swap_id,
        req.accept,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(SwapResolutionApiResponse {
        swap_id: resolution.swap_id,
        status: resolution.status.to_string(),
    }))
}

/// Handler for GET `/events/{event_id}/swaps`.
async fn handle_list_pending_swaps(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
) -> Result<Json<PendingSwapsApiResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let pending = slotbook_api::list_pending_swaps(&mut persistence, &actor, event_id)?;
    drop(persistence);

    Ok(Json(PendingSwapsApiResponse {
        swaps: pending.swaps.iter().map(swap_to_response).collect(),
    }))
}

/// Handler for GET `/events/{event_id}/audit`.
async fn handle_event_audit_log(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<AuditEntryResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let entries: Vec<AuditEntryData> =
        slotbook_api::event_audit_log(&mut persistence, &actor, event_id)?;
    drop(persistence);

    Ok(Json(entries.iter().map(audit_to_response).collect()))
}

/// Handler for POST `/events/{event_id}/roles`.
async fn handle_grant_role(
    AxumState(app_state): AxumState<AppState>,
    SessionParticipant(actor): SessionParticipant,
    Path(event_id): Path<i64>,
    Json(req): Json<GrantRoleApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(event_id, participant_id = req.participant_id, role = %req.role, "Handling grant_role request");

    let role: EventRole = EventRole::from_str(&req.role).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;

    let mut persistence = app_state.persistence.lock().await;
    slotbook_api::grant_role(
        &mut persistence,
        &actor,
        event_id,
        req.participant_id,
        role,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Granted role '{}'", req.role)),
        id: None,
    }))
}

/// Handler for POST `/reminders/sweep`.
///
/// Meant to be hit by an external scheduler. Guarded by the shared
/// secret from the command line, not by a participant session.
async fn handle_reminder_sweep(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<SweepReportApiResponse>, HttpError> {
    let Some(expected) = app_state.reminder_secret.as_deref() else {
        return Err(HttpError {
            status: StatusCode::FORBIDDEN,
            message: String::from("Reminder sweep is not configured"),
        });
    };

    let provided: &str = headers
        .get("X-Reminder-Secret")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if provided != expected {
        return Err(HttpError {
            status: StatusCode::FORBIDDEN,
            message: String::from("Invalid reminder sweep secret"),
        });
    }

    info!("Handling reminder sweep request");

    let mut persistence = app_state.persistence.lock().await;
    let report: ReminderSweepReport = slotbook_api::run_reminder_sweep(
        &mut persistence,
        &LogNotifier,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(SweepReportApiResponse {
        sent: report.sent,
        skipped: report.skipped,
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/events", get(handle_list_events))
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", put(handle_update_event))
        .route("/events/{event_id}/duplicate", post(handle_duplicate_event))
        .route("/events/{event_id}/slots", post(handle_create_slot))
        .route(
            "/events/{event_id}/slots/generate",
            post(handle_generate_slots),
        )
        .route("/events/{event_id}/swaps", get(handle_list_pending_swaps))
        .route("/events/{event_id}/audit", get(handle_event_audit_log))
        .route("/events/{event_id}/roles", post(handle_grant_role))
        .route("/public/events/{slug}", get(handle_event_detail))
        .route(
            "/public/events/{slug}/signups",
            post(handle_request_signup),
        )
        .route(
            "/public/signups/confirm/{token}",
            post(handle_complete_signup),
        )
        .route("/slots/{slot_id}", delete(handle_delete_slot))
        .route("/bookings/{booking_id}", delete(handle_cancel_booking))
        .route("/swaps", post(handle_request_swap))
        .route("/swaps/{swap_id}/respond", post(handle_respond_to_swap))
        .route("/reminders/sweep", post(handle_reminder_sweep))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Slotbook Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        reminder_secret: args.reminder_secret,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
