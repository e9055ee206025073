//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain resolvers and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AccountResolvers;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountResolvers>,
}

impl HttpState {
    /// Construct state around the account resolvers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::{AccountResolvers, CredentialFailurePolicy};
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::memory::{InMemoryTokenService, InMemoryUserService};
    ///
    /// let resolvers = AccountResolvers::new(
    ///     Arc::new(InMemoryUserService::default()),
    ///     Arc::new(InMemoryTokenService::default()),
    ///     CredentialFailurePolicy::default(),
    /// );
    /// let state = HttpState::new(Arc::new(resolvers));
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(accounts: Arc<AccountResolvers>) -> Self {
        Self { accounts }
    }
}
