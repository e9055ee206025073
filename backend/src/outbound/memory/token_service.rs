//! In-memory bearer token issuer and verifier.
//!
//! Tokens are 32 random bytes, hex-encoded, mapped to the bound user id and an
//! expiry taken from the injected [`Clock`]. Expired grants are dropped when
//! next seen.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use rand::RngCore;

use crate::domain::ports::{AuthService, AuthServiceError, TokenVerificationError, TokenVerifier};
use crate::domain::{IssuedToken, User, UserId};

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::hours(24);

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy)]
struct Grant {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// Reference [`AuthService`] and [`TokenVerifier`] backed by a map.
pub struct InMemoryTokenService {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    grants: RwLock<HashMap<String, Grant>>,
}

impl Default for InMemoryTokenService {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock), DEFAULT_TOKEN_TTL)
    }
}

impl InMemoryTokenService {
    /// Build a service issuing tokens valid for `ttl`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::TimeDelta;
    /// use mockable::DefaultClock;
    /// use accounts::outbound::memory::InMemoryTokenService;
    ///
    /// let tokens = InMemoryTokenService::new(Arc::new(DefaultClock), TimeDelta::minutes(15));
    /// assert_eq!(tokens.ttl(), TimeDelta::minutes(15));
    /// ```
    pub fn new(clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self {
            clock,
            ttl,
            grants: RwLock::new(HashMap::new()),
        }
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    fn mint() -> String {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[async_trait]
impl AuthService for InMemoryTokenService {
    async fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthServiceError> {
        if !user.id().is_assigned() {
            return Err(AuthServiceError::issuance(
                "cannot bind a token to an unsaved user",
            ));
        }
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthServiceError::issuance("token expiry overflow"))?;

        let mut grants = self
            .grants
            .write()
            .map_err(|_| AuthServiceError::unavailable("token store lock poisoned"))?;
        grants.retain(|_, grant| grant.expires_at > now);

        let token = Self::mint();
        grants.insert(
            token.clone(),
            Grant {
                user_id: user.id(),
                expires_at,
            },
        );
        Ok(IssuedToken::new(token))
    }
}

#[async_trait]
impl TokenVerifier for InMemoryTokenService {
    async fn verify(&self, token: &str) -> Result<Option<UserId>, TokenVerificationError> {
        let now = self.clock.utc();
        let mut grants = self
            .grants
            .write()
            .map_err(|_| TokenVerificationError::unavailable("token store lock poisoned"))?;
        match grants.get(token).copied() {
            Some(grant) if grant.expires_at > now => Ok(Some(grant.user_id)),
            Some(_) => {
                grants.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::Password;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        fn advance(&self, delta: TimeDelta) {
            *self.0.lock().expect("clock mutex") += delta;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn saved_user(raw: u32) -> User {
        User::new(UserId::new(raw).expect("fixture id"), "ada@example.com", Password::new("pw"))
    }

    #[rstest]
    #[tokio::test]
    async fn issued_token_verifies_to_bound_user(clock: Arc<MutableClock>) {
        let service = InMemoryTokenService::new(clock, TimeDelta::minutes(5));
        let token = service.issue_token(&saved_user(3)).await.expect("issued");

        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        let resolved = service.verify(token.as_str()).await.expect("verify");
        assert_eq!(resolved, Some(UserId::new(3).expect("fixture id")));
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_are_unique_per_issue(clock: Arc<MutableClock>) {
        let service = InMemoryTokenService::new(clock, TimeDelta::minutes(5));
        let user = saved_user(3);
        let first = service.issue_token(&user).await.expect("issued");
        let second = service.issue_token(&user).await.expect("issued");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn expired_token_resolves_to_none(clock: Arc<MutableClock>) {
        let service = InMemoryTokenService::new(clock.clone(), TimeDelta::minutes(5));
        let token = service.issue_token(&saved_user(3)).await.expect("issued");

        clock.advance(TimeDelta::minutes(5));
        assert_eq!(service.verify(token.as_str()).await.expect("verify"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_token_resolves_to_none(clock: Arc<MutableClock>) {
        let service = InMemoryTokenService::new(clock, TimeDelta::minutes(5));
        assert_eq!(service.verify("deadbeef").await.expect("verify"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn refuses_unsaved_user(clock: Arc<MutableClock>) {
        let service = InMemoryTokenService::new(clock, TimeDelta::minutes(5));
        let shell = User::registration("new@example.com", Password::new("pw"));
        let err = service.issue_token(&shell).await.expect_err("unsaved");
        assert!(matches!(err, AuthServiceError::Issuance { .. }));
    }
}
