//! Authorization gate for admin-only views.
//!
//! Both checks fail closed: an unreadable session is indistinguishable from no
//! session, and any role other than `"admin"` is refused by [`require_admin`].

use super::principal::Principal;
use super::session::SessionReader;

/// Path to send a visitor with no session.
pub const SIGN_IN_PATH: &str = "/login";
/// Path to send a signed-in user lacking privilege.
pub const ACCESS_DENIED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// No session where one is required.
    Unauthorized,
    /// Session present, privilege insufficient.
    Forbidden,
}

impl AccessErrorKind {
    /// Where the UI should navigate instead of rendering the guarded view.
    #[must_use]
    pub fn redirect_path(self) -> &'static str {
        match self {
            Self::Unauthorized => SIGN_IN_PATH,
            Self::Forbidden => ACCESS_DENIED_PATH,
        }
    }
}

impl std::fmt::Display for AccessErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("unauthorized: sign-in required"),
            Self::Forbidden => f.write_str("forbidden: admin access required"),
        }
    }
}

/// A failed access check. Branch on [`AccessError::kind`], not the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct AccessError {
    pub kind: AccessErrorKind,
}

impl AccessError {
    #[must_use]
    pub fn unauthorized() -> Self {
        Self { kind: AccessErrorKind::Unauthorized }
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self { kind: AccessErrorKind::Forbidden }
    }
}

/// Return the signed-in principal or fail with `Unauthorized`.
///
/// # Errors
///
/// [`AccessErrorKind::Unauthorized`] when no readable session exists.
pub async fn require_authenticated(session: &SessionReader) -> Result<Principal, AccessError> {
    session.current_user().await.ok_or_else(AccessError::unauthorized)
}

/// Return the signed-in principal if they are an admin.
///
/// # Errors
///
/// [`AccessErrorKind::Unauthorized`] when no session exists, checked first;
/// [`AccessErrorKind::Forbidden`] when the role is anything but `"admin"`.
pub async fn require_admin(session: &SessionReader) -> Result<Principal, AccessError> {
    let principal = require_authenticated(session).await?;
    if !principal.is_admin() {
        tracing::info!(user_id = principal.id(), role = %principal.role(), "admin access refused");
        return Err(AccessError::forbidden());
    }
    Ok(principal)
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
