//! Session and authorization boundary.
//!
//! ARCHITECTURE
//! ============
//! The identity provider is opaque: it exposes a session read and a sign-out
//! operation through [`session::SessionProvider`]. Everything else here is
//! layered on top of that narrow interface so route guards and the backend
//! client never depend on how the provider persists sessions.

pub mod file;
pub mod gate;
pub mod principal;
pub mod session;
pub mod signout;
