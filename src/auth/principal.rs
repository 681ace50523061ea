//! The authenticated principal as read from the identity provider.
//!
//! DESIGN
//! ======
//! A principal is either fully present or absent. Provider payloads are
//! validated on the way in, so downstream code never sees an empty id, email
//! or token. Only the literal role `"admin"` carries privilege; any other
//! role string is preserved verbatim as [`Role::Other`]. A missing role is
//! `Role::Other("")`: the user is signed in but holds no privilege.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role literal that grants access to admin-only views.
pub const ADMIN_ROLE: &str = "admin";

/// Errors produced while turning a provider payload into a [`Principal`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PrincipalError {
    /// A required field was absent or blank.
    #[error("principal payload missing field `{0}`")]
    MissingField(&'static str),

    /// The payload did not have the expected shape.
    #[error("malformed principal payload: {0}")]
    Malformed(String),
}

// =============================================================================
// ROLE
// =============================================================================

/// Privilege level carried by a principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    /// Any non-admin role, kept as the provider sent it.
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => ADMIN_ROLE,
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        if raw == ADMIN_ROLE { Self::Admin } else { Self::Other(raw) }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => ADMIN_ROLE.to_owned(),
            Role::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PRINCIPAL
// =============================================================================

/// Provider payload before validation. Every field is optional so a missing
/// field is reported by name instead of as a generic serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrincipal {
    id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
    access_token: Option<String>,
}

/// The signed-in user together with their role and bearer credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPrincipal")]
pub struct Principal {
    id: String,
    email: String,
    name: String,
    role: Role,
    access_token: String,
}

impl Principal {
    /// Build a principal, rejecting a blank id, email, name or token.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError::MissingField`] naming the first blank field.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<Role>,
        access_token: impl Into<String>,
    ) -> Result<Self, PrincipalError> {
        Ok(Self {
            id: required(Some(id.into()), "id")?,
            email: required(Some(email.into()), "email")?,
            name: required(Some(name.into()), "name")?,
            role: role.into(),
            access_token: required(Some(access_token.into()), "accessToken")?,
        })
    }

    /// Validate the user object embedded in a provider session.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError::Malformed`] when the payload is not an object
    /// of strings, or [`PrincipalError::MissingField`] when a field is blank.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, PrincipalError> {
        let raw: RawPrincipal =
            serde_json::from_value(payload).map_err(|e| PrincipalError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<RawPrincipal> for Principal {
    type Error = PrincipalError;

    fn try_from(raw: RawPrincipal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: required(raw.id, "id")?,
            email: required(raw.email, "email")?,
            name: required(raw.name, "name")?,
            role: Role::from(raw.role.unwrap_or_default()),
            access_token: required(raw.access_token, "accessToken")?,
        })
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PrincipalError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PrincipalError::MissingField(field)),
    }
}

#[cfg(test)]
#[path = "principal_test.rs"]
mod tests;
