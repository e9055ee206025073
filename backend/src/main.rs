//! Accounts service entry-point: loads settings, wires the in-memory adapters
//! and serves the REST endpoints.

mod server;

use std::sync::Arc;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::config::AccountsSettings;
use accounts::domain::AccountResolvers;
use accounts::outbound::memory::{InMemoryTokenService, InMemoryUserService};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AccountsSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let policy = settings.credential_failure_policy();

    let tokens = Arc::new(InMemoryTokenService::new(Arc::new(DefaultClock), token_ttl));
    let accounts = Arc::new(AccountResolvers::new(
        Arc::new(InMemoryUserService::new()),
        tokens.clone(),
        policy,
    ));

    let server = create_server(ServerConfig::new(bind_addr, accounts, tokens))?;
    info!(%bind_addr, ?policy, "accounts service listening");
    server.await
}
