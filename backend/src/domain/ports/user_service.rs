//! Driven port for user persistence and account rules.
//!
//! The account resolvers depend on this trait for lookups, password checks and
//! writes. Adapters own storage and hashing; the core only relies on the
//! error kinds below and on `create` filling in server-assigned fields on the
//! record it is handed.

use async_trait::async_trait;

use crate::domain::{Error, Password, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user service adapters.
    pub enum UserServiceError {
        /// No record matched the lookup key.
        NotFound { message: String } => "user not found: {message}",
        /// Supplied password did not match the stored one.
        InvalidCredentials => "invalid credentials",
        /// Write clashed with an existing record.
        Conflict { message: String } => "user conflict: {message}",
        /// Write rejected by account rules.
        Validation { message: String } => "user validation failed: {message}",
        /// Backing store could not be reached or the call was cancelled.
        Unavailable { message: String } => "user service unavailable: {message}",
    }
}

/// Port for reading and writing user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: UserId) -> Result<User, UserServiceError>;

    /// Fetch a user by login email.
    async fn get_by_email(&self, email: &str) -> Result<User, UserServiceError>;

    /// Check `supplied` against the `stored` password material.
    async fn compare_password(
        &self,
        supplied: &Password,
        stored: &Password,
    ) -> Result<(), UserServiceError>;

    /// Persist a new user.
    ///
    /// On success the adapter must have written the assigned id, role and
    /// active flag back into `user`.
    async fn create(&self, user: &mut User) -> Result<(), UserServiceError>;

    /// Persist changes to an existing user.
    async fn update(&self, user: &User) -> Result<(), UserServiceError>;
}

impl From<UserServiceError> for Error {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound { message } => Error::not_found(message),
            UserServiceError::InvalidCredentials => Error::invalid_credentials("invalid credentials"),
            UserServiceError::Conflict { message } => Error::conflict(message),
            UserServiceError::Validation { message } => Error::invalid_request(message),
            UserServiceError::Unavailable { message } => Error::service_unavailable(message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserServiceError::not_found("id 4"), ErrorCode::NotFound)]
    #[case(UserServiceError::invalid_credentials(), ErrorCode::InvalidCredentials)]
    #[case(UserServiceError::conflict("email taken"), ErrorCode::Conflict)]
    #[case(UserServiceError::validation("email required"), ErrorCode::InvalidRequest)]
    #[case(UserServiceError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
    fn maps_each_kind_onto_domain_code(#[case] err: UserServiceError, #[case] code: ErrorCode) {
        assert_eq!(Error::from(err).code(), code);
    }

    #[rstest]
    fn keeps_adapter_message() {
        let error = Error::from(UserServiceError::conflict("email already registered"));
        assert_eq!(error.message(), "email already registered");
    }
}
