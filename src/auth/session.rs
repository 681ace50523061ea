//! Session reading on top of an opaque identity provider.
//!
//! DESIGN
//! ======
//! The provider hands back its raw session document; the reader pulls the
//! embedded `user` object out and validates it into a [`Principal`].
//!
//! ERROR HANDLING
//! ==============
//! Reading never fails from the caller's point of view. A provider error or a
//! malformed payload is logged and reported as [`SessionLookup::Unavailable`],
//! which every caller treats the same as "nobody is signed in".

use std::sync::Arc;

use super::principal::Principal;

/// Errors surfaced by an identity provider.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// What the provider should do when tearing down the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOutOptions {
    /// Where to send the user afterwards. Only set when `redirect` is true.
    pub callback_url: Option<String>,
    /// `false` asks for an in-place teardown with no navigation.
    pub redirect: bool,
}

/// Narrow interface to the external identity provider.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Return the provider's current session document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the provider cannot be read.
    async fn session(&self) -> Result<Option<serde_json::Value>, SessionError>;

    /// Invalidate the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the provider rejects the sign-out.
    async fn sign_out(&self, options: SignOutOptions) -> Result<(), SessionError>;
}

/// Outcome of a single session read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Authenticated(Principal),
    /// No session exists.
    Anonymous,
    /// The session could not be read or did not validate.
    Unavailable(String),
}

impl SessionLookup {
    /// Collapse to the caller-facing view: a principal or nothing.
    #[must_use]
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Anonymous | Self::Unavailable(_) => None,
        }
    }
}

/// Reads the current principal from a [`SessionProvider`].
#[derive(Clone)]
pub struct SessionReader {
    provider: Arc<dyn SessionProvider>,
}

impl SessionReader {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Read the session and report exactly what happened.
    pub async fn lookup(&self) -> SessionLookup {
        let session = match self.provider.session().await {
            Ok(Some(session)) => session,
            Ok(None) => return SessionLookup::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "session read failed; treating as anonymous");
                return SessionLookup::Unavailable(e.to_string());
            }
        };

        let Some(user) = session.get("user").cloned() else {
            tracing::warn!("session has no user payload; treating as anonymous");
            return SessionLookup::Unavailable("session has no user payload".to_owned());
        };

        match Principal::from_payload(user) {
            Ok(principal) => SessionLookup::Authenticated(principal),
            Err(e) => {
                tracing::warn!(error = %e, "session user failed validation; treating as anonymous");
                SessionLookup::Unavailable(e.to_string())
            }
        }
    }

    /// Current principal, or `None` when signed out or unreadable.
    pub async fn current_user(&self) -> Option<Principal> {
        self.lookup().await.into_principal()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
