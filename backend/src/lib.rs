//! Accounts service library.
//!
//! Identity resolution and request authorisation for a small user-account
//! API: register, login, read a user, read and patch the caller's own
//! profile.
//!
//! - [`domain`]: error taxonomy, user record, identity carrier and gate, API
//!   projection, account resolvers and the ports they depend on.
//! - [`inbound::http`]: Actix handlers exposing the resolvers.
//! - [`outbound::memory`]: in-memory adapters for the ports.
//! - [`middleware`]: trace correlation and bearer-token identity.
//! - [`config`]: OrthoConfig-backed settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::{IdentityLayer, Trace};
