//! Sign-out: drop the locally cached credential, then end the provider session.
//!
//! The local clear is synchronous and happens before the provider call is
//! awaited, so a failing or hung provider never leaves a stale token behind.

use std::io;
use std::sync::{Arc, Mutex};

use super::session::{SessionError, SessionProvider, SignOutOptions};

/// Default navigation target after a forced sign-out.
pub const DEFAULT_SIGN_OUT_REDIRECT: &str = "/login";

/// Local cache of the bearer credential (browser storage, a token file, ...).
pub trait CredentialStore: Send + Sync {
    /// Read the cached token, if any.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the backing storage cannot be read.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the cached token.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the backing storage cannot be written.
    fn store(&self, token: &str) -> io::Result<()>;

    /// Remove the cached token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an existing artifact cannot be removed.
    fn clear(&self) -> io::Result<()>;
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot().clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.slot() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Coordinates local credential cleanup with the provider's sign-out.
#[derive(Clone)]
pub struct SignOutCoordinator {
    store: Arc<dyn CredentialStore>,
    provider: Arc<dyn SessionProvider>,
    default_redirect: String,
}

impl SignOutCoordinator {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, provider: Arc<dyn SessionProvider>) -> Self {
        Self { store, provider, default_redirect: DEFAULT_SIGN_OUT_REDIRECT.to_owned() }
    }

    /// Override where [`Self::sign_out_and_redirect`] sends the user.
    #[must_use]
    pub fn with_default_redirect(mut self, target: impl Into<String>) -> Self {
        self.default_redirect = target.into();
        self
    }

    #[must_use]
    pub fn default_redirect(&self) -> &str {
        &self.default_redirect
    }

    /// Clear the cached credential, then sign out with the provider.
    ///
    /// A redirect target is passed only when `force_redirect` is set;
    /// otherwise the provider tears the session down in place.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`SessionError`]. The local credential is
    /// already gone by then.
    pub async fn sign_out(&self, force_redirect: bool) -> Result<(), SessionError> {
        self.sign_out_to(None, force_redirect).await
    }

    /// [`Self::sign_out`] with an explicit redirect target. `callback`
    /// falls back to the default target and is ignored unless
    /// `force_redirect` is set.
    ///
    /// # Errors
    ///
    /// See [`Self::sign_out`].
    pub async fn sign_out_to(&self, callback: Option<&str>, force_redirect: bool) -> Result<(), SessionError> {
        self.clear_local();

        let options = if force_redirect {
            let target = callback.unwrap_or(&self.default_redirect);
            SignOutOptions { callback_url: Some(target.to_owned()), redirect: true }
        } else {
            SignOutOptions { callback_url: None, redirect: false }
        };

        self.provider
            .sign_out(options)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "provider sign-out failed"))
    }

    /// Sign out and always redirect to the default target.
    ///
    /// # Errors
    ///
    /// See [`Self::sign_out`].
    pub async fn sign_out_and_redirect(&self) -> Result<(), SessionError> {
        self.sign_out(true).await
    }

    fn clear_local(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear cached credential");
        }
    }
}

#[cfg(test)]
#[path = "signout_test.rs"]
mod tests;
