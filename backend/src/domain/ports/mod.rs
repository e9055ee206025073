//! Domain ports for the hexagonal boundary.
//!
//! The account resolvers consume [`UserService`] and [`AuthService`]. The
//! identity middleware consumes [`TokenVerifier`]. Adapters live under
//! `crate::outbound`.

mod auth_service;
mod macros;
mod user_service;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use auth_service::{MockAuthService, MockTokenVerifier};
pub use auth_service::{AuthService, AuthServiceError, TokenVerificationError, TokenVerifier};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{UserService, UserServiceError};
