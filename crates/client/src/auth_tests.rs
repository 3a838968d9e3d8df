// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn roster() -> StaticAuthProvider {
    StaticAuthProvider::new(vec![
        UserRecord {
            username: "modan_op".into(),
            password: "secret".into(),
            location: Some("Modan".into()),
            role: Role::Operator,
        },
        UserRecord {
            username: "admin".into(),
            password: "hunter2".into(),
            location: None,
            role: Role::Admin,
        },
        UserRecord {
            username: "floater".into(),
            password: "pw".into(),
            location: None,
            role: Role::Operator,
        },
    ])
}

#[test]
fn operator_login_is_scoped_to_their_location() {
    let session = roster().authenticate("modan_op", "secret").unwrap();
    assert_eq!(session.role, Role::Operator);
    assert!(session.scope.allows("Modan"));
    assert!(!session.scope.allows("Baldeya"));
}

#[test]
fn admin_login_sees_everything() {
    let session = roster().authenticate("admin", "hunter2").unwrap();
    assert!(session.is_admin());
    assert!(session.scope.allows("anywhere"));
}

#[test]
fn wrong_password_is_rejected() {
    let err = roster().authenticate("modan_op", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn unknown_user_is_rejected() {
    let err = roster().authenticate("nobody", "secret").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn operator_without_a_location_cannot_log_in() {
    let err = roster().authenticate("floater", "pw").unwrap_err();
    assert!(matches!(err, AuthError::MissingLocation(_)));
}

#[test]
fn session_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let file = SessionFile::new(dir.path());
    let session = Session::operator("modan_op", "Modan");

    file.save(&session).unwrap();
    assert_eq!(file.load().unwrap(), Some(session));

    file.clear().unwrap();
    assert_eq!(file.load().unwrap(), None);
}

#[test]
fn missing_session_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = SessionFile::new(dir.path());
    assert_eq!(file.load().unwrap(), None);
    file.clear().unwrap();
}

#[test]
fn corrupt_session_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = SessionFile::new(dir.path());
    std::fs::write(file.path(), b"not json").unwrap();
    assert!(matches!(file.load().unwrap_err(), AuthError::Corrupt(_)));
}
