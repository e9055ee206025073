//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain types and whatever backs
//! them. They contain no business logic.
//!
//! - **memory**: lock-guarded maps implementing `UserService`, `AuthService`
//!   and `TokenVerifier`.

pub mod memory;
