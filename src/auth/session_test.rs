use super::*;
use crate::auth::principal::Role;
use crate::test_helpers::{MockProvider, reader, user_payload};
use serde_json::json;

#[tokio::test]
async fn lookup_returns_principal_for_valid_session() {
    let (session, _) = reader(MockProvider::with_user(user_payload("admin")));
    let SessionLookup::Authenticated(principal) = session.lookup().await else {
        panic!("expected authenticated lookup");
    };
    assert_eq!(principal.id(), "u-1");
    assert_eq!(principal.role(), &Role::Admin);
}

#[tokio::test]
async fn lookup_without_session_is_anonymous() {
    let (session, _) = reader(MockProvider::anonymous());
    assert_eq!(session.lookup().await, SessionLookup::Anonymous);
    assert!(session.current_user().await.is_none());
}

#[tokio::test]
async fn provider_failure_is_unavailable_not_error() {
    let (session, _) = reader(MockProvider::failing("cookie store offline"));
    let lookup = session.lookup().await;
    assert!(matches!(&lookup, SessionLookup::Unavailable(msg) if msg.contains("cookie store offline")));
    assert!(session.current_user().await.is_none());
}

#[tokio::test]
async fn session_without_user_is_unavailable() {
    let (session, _) = reader(MockProvider::with_session(json!({ "expires": "soon" })));
    assert!(matches!(session.lookup().await, SessionLookup::Unavailable(_)));
}

#[tokio::test]
async fn malformed_user_is_unavailable() {
    let mut user = user_payload("admin");
    user.as_object_mut().unwrap().remove("accessToken");
    let (session, _) = reader(MockProvider::with_user(user));
    let lookup = session.lookup().await;
    assert!(matches!(&lookup, SessionLookup::Unavailable(msg) if msg.contains("accessToken")));
}

#[tokio::test]
async fn non_admin_role_is_accepted_verbatim() {
    let (session, _) = reader(MockProvider::with_user(user_payload("member")));
    let principal = session.current_user().await.unwrap();
    assert_eq!(principal.role(), &Role::Other("member".into()));
}

#[tokio::test]
async fn every_lookup_reads_the_provider() {
    let (session, provider) = reader(MockProvider::anonymous());
    session.current_user().await;
    session.current_user().await;
    assert_eq!(provider.read_count(), 2);
}

#[test]
fn into_principal_drops_unavailable() {
    assert!(SessionLookup::Unavailable("x".into()).into_principal().is_none());
    assert!(SessionLookup::Anonymous.into_principal().is_none());
}
