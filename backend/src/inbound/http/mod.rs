//! HTTP inbound adapter exposing the account operations as REST endpoints.

pub mod error;
pub mod identity;
pub mod state;
pub mod users;

pub use error::ApiResult;
