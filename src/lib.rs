//! Admin access layer for the ISTC personal-training site.
//!
//! SYSTEM CONTEXT
//! ==============
//! The marketing site and admin dashboard talk to a remote backend for users,
//! testimonials and contact submissions. This crate owns the pieces with real
//! contracts: who is signed in, what role a view requires, and how requests
//! reach the backend with the caller's bearer credential.
//!
//! ARCHITECTURE
//! ============
//! - [`auth`] reads the identity provider's session, gates access by role and
//!   coordinates sign-out.
//! - [`api`] resolves the backend origin and issues typed REST calls.
//! - [`dashboard`] fans out the aggregate fetches behind the stats cards.

pub mod api;
pub mod auth;
pub mod dashboard;

#[cfg(test)]
mod test_helpers;

pub use api::client::{BackendClient, ClientError, RequestOptions};
pub use api::config::BackendConfig;
pub use auth::gate::{AccessError, AccessErrorKind};
pub use auth::principal::{Principal, Role};
pub use auth::session::{SessionLookup, SessionProvider, SessionReader};
pub use auth::signout::{CredentialStore, SignOutCoordinator};
