//! Account operation resolvers.
//!
//! One method per operation exposed to callers: `user`, `user_profile`,
//! `login`, `register` and `update_user`. Each short-circuits on the first
//! failing step and never retries. Identity-scoped operations pass through
//! [`require_identity`] before touching a collaborator, and every user that
//! leaves this module goes through [`ApiUser::from`].

use std::sync::Arc;

use tracing::{debug, info};

use super::ports::{AuthService, UserService, UserServiceError};
use super::{
    ApiUser, AuthPayload, Credentials, Error, IdentityContext, UpdateUserInput, User, UserId,
    require_identity,
};

/// Caller-facing message used when credential failures are unified.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// How login reports an unknown email versus a wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialFailurePolicy {
    /// Unknown email fails with `NotFound`, wrong password with
    /// `InvalidCredentials`.
    #[default]
    Distinct,
    /// Both fail with `InvalidCredentials` and the same message.
    Unified,
}

impl CredentialFailurePolicy {
    /// Pick the policy from a boolean setting.
    #[must_use]
    pub const fn from_unified(unified: bool) -> Self {
        if unified { Self::Unified } else { Self::Distinct }
    }

    fn map(self, err: UserServiceError) -> Error {
        match (self, err) {
            (
                Self::Unified,
                UserServiceError::NotFound { .. } | UserServiceError::InvalidCredentials,
            ) => Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE),
            (_, other) => other.into(),
        }
    }
}

/// Resolvers for the account operations.
///
/// # Examples
/// ```no_run
/// # use std::sync::Arc;
/// # use accounts::domain::{AccountResolvers, CredentialFailurePolicy, Credentials};
/// # use accounts::outbound::memory::{InMemoryTokenService, InMemoryUserService};
/// # async fn example() -> Result<(), accounts::domain::Error> {
/// let resolvers = AccountResolvers::new(
///     Arc::new(InMemoryUserService::default()),
///     Arc::new(InMemoryTokenService::default()),
///     CredentialFailurePolicy::Distinct,
/// );
/// let creds = Credentials::try_from_parts("ada@example.com", "pw").expect("valid credentials");
/// let payload = resolvers.register(creds).await?;
/// assert_eq!(payload.user.email, "ada@example.com");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccountResolvers {
    users: Arc<dyn UserService>,
    auth: Arc<dyn AuthService>,
    policy: CredentialFailurePolicy,
}

impl AccountResolvers {
    /// Wire the resolvers to their collaborators.
    pub fn new(
        users: Arc<dyn UserService>,
        auth: Arc<dyn AuthService>,
        policy: CredentialFailurePolicy,
    ) -> Self {
        Self {
            users,
            auth,
            policy,
        }
    }

    /// Active credential failure policy.
    #[must_use]
    pub fn policy(&self) -> CredentialFailurePolicy {
        self.policy
    }

    /// Public lookup of any user by id. No identity required.
    pub async fn user(&self, id: UserId) -> Result<ApiUser, Error> {
        let user = self.users.get_by_id(id).await?;
        Ok(ApiUser::from(&user))
    }

    /// The caller's own profile.
    pub async fn user_profile(&self, context: &IdentityContext) -> Result<ApiUser, Error> {
        let caller = require_identity(context)?;
        let user = self.users.get_by_id(caller).await?;
        Ok(ApiUser::from(&user))
    }

    /// Exchange credentials for a token.
    ///
    /// Steps: lookup by email, password comparison, token issuance. An
    /// unknown email never reaches the comparison and no token is issued on
    /// any failure.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthPayload, Error> {
        let user = self
            .users
            .get_by_email(credentials.email())
            .await
            .map_err(|err| self.policy.map(err))?;

        if let Err(err) = self
            .users
            .compare_password(credentials.password(), user.password())
            .await
        {
            debug!(user_id = %user.id(), "login rejected");
            return Err(self.policy.map(err));
        }

        let payload = self.issue(&user).await?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(payload)
    }

    /// Create an account and sign it in.
    pub async fn register(&self, credentials: Credentials) -> Result<AuthPayload, Error> {
        let (email, password) = credentials.into_parts();
        let mut user = User::registration(email, password);
        self.users.create(&mut user).await?;

        // Token issuance binds to the id `create` wrote back.
        if !user.id().is_assigned() {
            return Err(Error::internal("user service did not assign an id"));
        }

        let payload = self.issue(&user).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(payload)
    }

    /// Apply a partial update to the caller's own record.
    ///
    /// Returns the record as patched here rather than re-reading it.
    pub async fn update_user(
        &self,
        context: &IdentityContext,
        input: UpdateUserInput,
    ) -> Result<ApiUser, Error> {
        let caller = require_identity(context)?;
        input.validate()?;

        let mut user = self.users.get_by_id(caller).await?;
        input.apply_to(&mut user)?;
        self.users.update(&user).await?;

        debug!(user_id = %caller, "profile updated");
        Ok(ApiUser::from(&user))
    }

    async fn issue(&self, user: &User) -> Result<AuthPayload, Error> {
        let token = self.auth.issue_token(user).await?;
        Ok(AuthPayload {
            token,
            user: ApiUser::from(user),
        })
    }
}
