//! Driven ports for bearer tokens.
//!
//! [`AuthService`] issues tokens for the resolvers. [`TokenVerifier`] turns a
//! presented token back into a user id and is only consulted by the identity
//! middleware; resolvers never verify tokens themselves.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing a token.
    pub enum AuthServiceError {
        /// The issuer refused or failed to mint a token.
        Issuance { message: String } => "token issuance failed: {message}",
        /// The issuer could not be reached.
        Unavailable { message: String } => "token issuer unavailable: {message}",
    }
}

define_port_error! {
    /// Errors raised while verifying a presented token.
    ///
    /// Unknown or expired tokens are not errors; verifiers report them as
    /// `Ok(None)`.
    pub enum TokenVerificationError {
        /// The verifier backend could not be reached.
        Unavailable { message: String } => "token verifier unavailable: {message}",
    }
}

/// Port for minting opaque bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a token bound to `user`.
    async fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthServiceError>;
}

/// Port for resolving a presented bearer token to a user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Return the bound user id, or `None` for unknown or expired tokens.
    async fn verify(&self, token: &str) -> Result<Option<UserId>, TokenVerificationError>;
}

impl From<AuthServiceError> for Error {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::Issuance { message } => Error::token_issuance(message),
            AuthServiceError::Unavailable { message } => Error::service_unavailable(message),
        }
    }
}

impl From<TokenVerificationError> for Error {
    fn from(err: TokenVerificationError) -> Self {
        match err {
            TokenVerificationError::Unavailable { message } => Error::service_unavailable(message),
        }
    }
}
