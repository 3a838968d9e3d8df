// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn operator_scope_allows_only_own_location() {
    let session = Session::operator("1111", "Modan");
    assert!(session.scope.allows("Modan"));
    assert!(!session.scope.allows("Baldeya"));
    assert!(!session.is_admin());
}

#[test]
fn admin_scope_allows_everything() {
    let session = Session::admin("Admin");
    assert!(session.scope.allows("Modan"));
    assert!(session.scope.allows("Baldeya"));
    assert!(session.is_admin());
}

#[test]
fn session_round_trips_through_json() {
    let session = Session::operator("2222", "Baldeya");
    let json = serde_json::to_string(&session).unwrap();
    let back: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}

#[test]
fn role_displays_lowercase() {
    assert_eq!(Role::Operator.to_string(), "operator");
    assert_eq!(Role::Admin.to_string(), "admin");
}
