//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ACCOUNTS_*` environment variables and config
//! files, in that order of precedence. Every field is optional; accessors
//! fall back to the defaults below.

use std::net::{IpAddr, SocketAddr};

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::CredentialFailurePolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Host is not an IP address.
    #[error("invalid bind host `{host}`")]
    InvalidHost { host: String },
    /// Token lifetime is zero or too large to represent.
    #[error("token ttl must be between 1 and {max} seconds, got {secs}")]
    InvalidTokenTtl { secs: u64, max: i64 },
}

/// Settings for the accounts service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AccountsSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Lifetime of issued bearer tokens, in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Report unknown email and wrong password identically on login.
    #[ortho_config(default = false)]
    pub unify_credential_failures: bool,
}

impl AccountsSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.trim().parse().map_err(|_| ConfigError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Result<TimeDelta, ConfigError> {
        let secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let max = TimeDelta::MAX.num_seconds();
        i64::try_from(secs)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
            .ok_or(ConfigError::InvalidTokenTtl { secs, max })
    }

    /// Login failure reporting policy.
    pub fn credential_failure_policy(&self) -> CredentialFailurePolicy {
        CredentialFailurePolicy::from_unified(self.unify_credential_failures)
    }
}
