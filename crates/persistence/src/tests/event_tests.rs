// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_owner, event_start, test_persistence};
use crate::PersistenceError;
use slotbook_domain::{Event, EventRole};

#[test]
fn created_event_round_trips_by_id_and_slug() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);

    let mut event = Event::new("Tournament", "spring-tournament", event_start(), owner_id);
    event.description = Some(String::from("Round robin"));
    event.max_signups_per_participant = 2;

    let event_id = persistence.create_event(&event).expect("event created");

    let by_id = persistence
        .get_event(event_id)
        .expect("query succeeds")
        .expect("event found");
    assert_eq!(by_id.title, "Tournament");
    assert_eq!(by_id.starts_at, event_start());
    assert_eq!(by_id.max_signups_per_participant, 2);

    let by_slug = persistence
        .get_event_by_slug("spring-tournament")
        .expect("query succeeds")
        .expect("event found");
    assert_eq!(by_slug.event_id, Some(event_id));
}

#[test]
fn duplicate_slug_is_rejected() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);

    let event = Event::new("First", "taken-slug", event_start(), owner_id);
    persistence.create_event(&event).expect("event created");

    let second = Event::new("Second", "taken-slug", event_start(), owner_id);
    assert!(persistence.create_event(&second).is_err());
}

#[test]
fn update_changes_settings_in_place() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);

    let event = Event::new("Original", "updatable", event_start(), owner_id);
    let event_id = persistence.create_event(&event).expect("event created");

    let mut updated = persistence
        .get_event(event_id)
        .expect("query succeeds")
        .expect("event found");
    updated.title = String::from("Renamed");
    updated.allow_swap = false;

    persistence.update_event(&updated).expect("event updated");

    let reloaded = persistence
        .get_event(event_id)
        .expect("query succeeds")
        .expect("event found");
    assert_eq!(reloaded.title, "Renamed");
    assert!(!reloaded.allow_swap);
}

#[test]
fn update_of_missing_event_reports_not_found() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);

    let mut event = Event::new("Ghost", "ghost", event_start(), owner_id);
    event.event_id = Some(9999);

    assert_eq!(
        persistence.update_event(&event),
        Err(PersistenceError::EventNotFound(9999))
    );
}

#[test]
fn role_grant_replaces_previous_role() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);
    let helper_id = persistence
        .create_participant("helper@example.com", "$2b$12$testhash", None)
        .expect("participant created");

    let event = Event::new("Roles", "roles", event_start(), owner_id);
    let event_id = persistence.create_event(&event).expect("event created");

    persistence
        .grant_event_role(event_id, helper_id, EventRole::Viewer)
        .expect("role granted");
    persistence
        .grant_event_role(event_id, helper_id, EventRole::Coordinator)
        .expect("role replaced");

    let role = persistence
        .get_event_role(event_id, helper_id)
        .expect("query succeeds");
    assert_eq!(role, Some(EventRole::Coordinator));

    assert_eq!(
        persistence
            .get_event_role(event_id, owner_id)
            .expect("query succeeds"),
        None
    );
}

#[test]
fn teams_are_reused_by_name_within_an_event() {
    let mut persistence = test_persistence();
    let owner_id = create_test_owner(&mut persistence);

    let event = Event::new("Teams", "teams", event_start(), owner_id);
    let event_id = persistence.create_event(&event).expect("event created");

    let first = persistence
        .find_or_create_team(event_id, "Red Rockets", Some("captain@example.com"), None)
        .expect("team created");
    let second = persistence
        .find_or_create_team(event_id, "Red Rockets", None, None)
        .expect("team reused");

    assert_eq!(first, second);

    let team = persistence
        .get_team(first)
        .expect("query succeeds")
        .expect("team found");
    assert_eq!(team.name, "Red Rockets");
    assert_eq!(team.contact_email.as_deref(), Some("captain@example.com"));
}
