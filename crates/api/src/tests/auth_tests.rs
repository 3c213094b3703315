// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{now, test_persistence};
use crate::auth::AuthenticationService;
use crate::error::{ApiError, AuthError};
use time::Duration;

#[test]
fn register_login_validate_logout_round_trip() {
    let mut persistence = test_persistence();

    let participant_id = AuthenticationService::register(
        &mut persistence,
        "User@Example.com",
        "correct horse battery",
        Some("User"),
    )
    .expect("registration succeeds");

    let (token, actor) = AuthenticationService::login(
        &mut persistence,
        "user@example.com",
        "correct horse battery",
        now(),
    )
    .expect("login succeeds");
    assert_eq!(actor.participant_id(), participant_id);
    assert_eq!(actor.email(), "user@example.com");

    let validated = AuthenticationService::validate_session(&mut persistence, &token, now())
        .expect("session valid");
    assert_eq!(validated, actor);

    AuthenticationService::logout(&mut persistence, &token).expect("logout succeeds");
    assert!(
        AuthenticationService::validate_session(&mut persistence, &token, now()).is_err(),
        "session must be gone after logout"
    );
}

#[test]
fn duplicate_registration_is_a_conflict() {
    let mut persistence = test_persistence();

    AuthenticationService::register(&mut persistence, "dup@example.com", "pw-one", None)
        .expect("registration succeeds");

    let err = AuthenticationService::register(&mut persistence, "DUP@example.com", "pw-two", None)
        .expect_err("second registration must fail");
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_email"));
}

#[test]
fn wrong_password_is_rejected() {
    let mut persistence = test_persistence();

    AuthenticationService::register(&mut persistence, "who@example.com", "right", None)
        .expect("registration succeeds");

    let err = AuthenticationService::login(&mut persistence, "who@example.com", "wrong", now())
        .expect_err("login must fail");
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn expired_sessions_are_rejected() {
    let mut persistence = test_persistence();

    AuthenticationService::register(&mut persistence, "late@example.com", "pw", None)
        .expect("registration succeeds");
    let (token, _) =
        AuthenticationService::login(&mut persistence, "late@example.com", "pw", now())
            .expect("login succeeds");

    let much_later = now() + Duration::days(31);
    let err = AuthenticationService::validate_session(&mut persistence, &token, much_later)
        .expect_err("expired session must fail");
    assert_eq!(
        err,
        AuthError::AuthenticationFailed {
            reason: String::from("Session expired")
        }
    );
}

#[test]
fn malformed_email_is_rejected_at_registration() {
    let mut persistence = test_persistence();

    let err = AuthenticationService::register(&mut persistence, "not-an-email", "pw", None)
        .expect_err("registration must fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "email"));
}
