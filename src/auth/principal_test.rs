use super::*;
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "id": "u-1",
        "email": "coach@istc.test",
        "name": "Coach",
        "role": "admin",
        "accessToken": "tok-123",
    })
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_admin_literal_is_admin() {
    assert_eq!(Role::from("admin"), Role::Admin);
    assert!(Role::from("admin").is_admin());
}

#[test]
fn role_comparison_is_case_sensitive() {
    let role = Role::from("Admin");
    assert_eq!(role, Role::Other("Admin".into()));
    assert!(!role.is_admin());
}

#[test]
fn role_other_keeps_raw_value() {
    let role = Role::from("trainer");
    assert_eq!(role.as_str(), "trainer");
    assert_eq!(role.to_string(), "trainer");
}

#[test]
fn role_serializes_as_plain_string() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
    assert_eq!(serde_json::to_value(Role::from("user")).unwrap(), json!("user"));
}

// =============================================================================
// Principal::from_payload
// =============================================================================

#[test]
fn from_payload_accepts_complete_user() {
    let principal = Principal::from_payload(payload()).unwrap();
    assert_eq!(principal.id(), "u-1");
    assert_eq!(principal.email(), "coach@istc.test");
    assert_eq!(principal.name(), "Coach");
    assert_eq!(principal.role(), &Role::Admin);
    assert_eq!(principal.access_token(), "tok-123");
    assert!(principal.is_admin());
}

#[test]
fn from_payload_accepts_any_role_string() {
    let mut raw = payload();
    raw["role"] = json!("client");
    let principal = Principal::from_payload(raw).unwrap();
    assert!(!principal.is_admin());
    assert_eq!(principal.role().as_str(), "client");
}

#[test]
fn from_payload_reports_missing_token() {
    let mut raw = payload();
    raw.as_object_mut().unwrap().remove("accessToken");
    assert_eq!(Principal::from_payload(raw), Err(PrincipalError::MissingField("accessToken")));
}

#[test]
fn from_payload_rejects_blank_field() {
    let mut raw = payload();
    raw["email"] = json!("   ");
    assert_eq!(Principal::from_payload(raw), Err(PrincipalError::MissingField("email")));
}

#[test]
fn from_payload_missing_role_is_unprivileged() {
    let mut raw = payload();
    raw.as_object_mut().unwrap().remove("role");
    let principal = Principal::from_payload(raw).unwrap();
    assert_eq!(principal.role(), &Role::Other(String::new()));
    assert!(!principal.is_admin());
}

#[test]
fn from_payload_blank_role_is_unprivileged() {
    let mut raw = payload();
    raw["role"] = json!("  ");
    assert!(!Principal::from_payload(raw).unwrap().is_admin());
}

#[test]
fn from_payload_rejects_non_object() {
    let err = Principal::from_payload(json!("not-a-user")).unwrap_err();
    assert!(matches!(err, PrincipalError::Malformed(_)));
}

#[test]
fn from_payload_rejects_wrong_field_type() {
    let mut raw = payload();
    raw["id"] = json!(42);
    assert!(matches!(Principal::from_payload(raw), Err(PrincipalError::Malformed(_))));
}

// =============================================================================
// Principal::new / serde / Debug
// =============================================================================

#[test]
fn new_rejects_empty_token() {
    let err = Principal::new("u-1", "a@b.c", "A", "admin", "").unwrap_err();
    assert_eq!(err, PrincipalError::MissingField("accessToken"));
}

#[test]
fn new_accepts_empty_role_without_privilege() {
    let principal = Principal::new("u-1", "a@b.c", "A", "", "tok").unwrap();
    assert_eq!(principal.role().as_str(), "");
    assert!(!principal.is_admin());
}

#[test]
fn serialize_uses_camel_case_token_field() {
    let principal = Principal::from_payload(payload()).unwrap();
    let value = serde_json::to_value(&principal).unwrap();
    assert_eq!(value, payload());
}

#[test]
fn deserialize_runs_validation() {
    let result = serde_json::from_value::<Principal>(json!({ "id": "u-1" }));
    assert!(result.is_err());
}

#[test]
fn debug_redacts_access_token() {
    let principal = Principal::from_payload(payload()).unwrap();
    let debug = format!("{principal:?}");
    assert!(debug.contains("coach@istc.test"));
    assert!(!debug.contains("tok-123"));
    assert!(debug.contains("<redacted>"));
}
