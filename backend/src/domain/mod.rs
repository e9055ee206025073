//! Domain primitives, account resolvers and ports.
//!
//! Purpose: keep identity handling, authorisation and the API projection
//! transport-agnostic. Inbound adapters build an [`IdentityContext`] and
//! [`Credentials`], call [`AccountResolvers`], and render the returned
//! [`ApiUser`] or [`Error`].
//!
//! Public surface:
//! - Error / ErrorCode: closed error taxonomy shared by every operation.
//! - User / UserId / Password / Role: the internal user record.
//! - IdentityContext / require_identity: caller identity and the gate.
//! - ApiUser / AuthPayload: credential-free output shapes.
//! - UpdateUserInput: partial profile patch.
//! - AccountResolvers: the five account operations.

pub mod account_resolvers;
pub mod api_user;
pub mod auth;
pub mod error;
pub mod identity;
pub mod ports;
pub mod profile_patch;
pub mod trace_id;
pub mod user;

pub use self::account_resolvers::{
    AccountResolvers, CredentialFailurePolicy, INVALID_CREDENTIALS_MESSAGE,
};
pub use self::api_user::{ApiUser, AuthPayload};
pub use self::auth::{Credentials, CredentialsValidationError, IssuedToken};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identity::{IdentityContext, UNAUTHORIZED_MESSAGE, require_identity};
pub use self::profile_patch::UpdateUserInput;
pub use self::trace_id::TraceId;
pub use self::user::{Password, Role, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
