//! Shared test doubles for the identity provider and the backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::api::client::BackendClient;
use crate::api::config::BackendConfig;
use crate::auth::session::{SessionError, SessionProvider, SessionReader, SignOutOptions};

// =========================================================================
// MockProvider
// =========================================================================

pub struct MockProvider {
    session: Result<Option<Value>, String>,
    fail_sign_out: bool,
    pub reads: AtomicUsize,
    pub sign_outs: Mutex<Vec<SignOutOptions>>,
}

impl MockProvider {
    fn new(session: Result<Option<Value>, String>) -> Self {
        Self { session, fail_sign_out: false, reads: AtomicUsize::new(0), sign_outs: Mutex::new(Vec::new()) }
    }

    pub fn anonymous() -> Self {
        Self::new(Ok(None))
    }

    pub fn with_user(user: Value) -> Self {
        Self::new(Ok(Some(json!({ "user": user, "expires": "2099-01-01T00:00:00.000Z" }))))
    }

    pub fn with_session(session: Value) -> Self {
        Self::new(Ok(Some(session)))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_owned()))
    }

    pub fn failing_sign_out(mut self) -> Self {
        self.fail_sign_out = true;
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionProvider for MockProvider {
    async fn session(&self) -> Result<Option<Value>, SessionError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.session.clone().map_err(SessionError::Provider)
    }

    async fn sign_out(&self, options: SignOutOptions) -> Result<(), SessionError> {
        self.sign_outs.lock().unwrap().push(options);
        if self.fail_sign_out {
            return Err(SessionError::Provider("sign-out rejected".into()));
        }
        Ok(())
    }
}

pub fn user_payload(role: &str) -> Value {
    json!({
        "id": "u-1",
        "email": "coach@istc.test",
        "name": "Coach",
        "role": role,
        "accessToken": "tok-123",
    })
}

pub fn reader(provider: MockProvider) -> (SessionReader, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (SessionReader::new(provider.clone()), provider)
}

// =========================================================================
// Backend
// =========================================================================

/// Serve `router` on an ephemeral localhost port and return its origin.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn client_for(origin: &str, provider: MockProvider) -> BackendClient {
    let config = BackendConfig::with_origin(origin);
    let (session, _) = reader(provider);
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    BackendClient::with_http(http, config, session)
}
