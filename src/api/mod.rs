//! Typed access to the remote backend.
//!
//! DESIGN
//! ======
//! [`client::BackendClient`] is the single path to the backend: origin
//! resolution, header merging, bearer injection and status handling all
//! happen there. [`resources`] layers typed endpoints on top.

pub mod client;
pub mod config;
pub mod resources;
pub mod types;
