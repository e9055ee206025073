//! In-memory adapters for the account ports.
//!
//! Used by the binary and by integration tests. No persistence, hashing or
//! token cryptography.

mod token_service;
mod user_service;

pub use token_service::{DEFAULT_TOKEN_TTL, InMemoryTokenService};
pub use user_service::InMemoryUserService;
