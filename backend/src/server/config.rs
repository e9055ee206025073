//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use accounts::domain::ports::TokenVerifier;
use accounts::domain::AccountResolvers;

/// Everything the server needs to build its application factory.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: Arc<AccountResolvers>,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
}

impl ServerConfig {
    /// Construct a server configuration from wired collaborators.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        accounts: Arc<AccountResolvers>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            bind_addr,
            accounts,
            verifier,
        }
    }
}
