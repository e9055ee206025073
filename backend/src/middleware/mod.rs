//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route: trace
//! correlation and caller identity resolution.

pub mod identity;
pub mod trace;

pub use identity::IdentityLayer;
pub use trace::Trace;
