//! Caller identity carrier and the authorisation gate.
//!
//! Upstream middleware resolves the bearer token once per request and hands
//! the resolvers an [`IdentityContext`]. The context holds a typed
//! [`UserId`] or nothing; there is no untyped slot to cast at use time.
//! Identity-scoped resolvers call [`require_identity`] before any service
//! lookup.

use super::{Error, UserId};

/// Caller-facing message for requests that reach a gated operation without
/// an identity.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Token is invalid";

/// Per-request, read-only slot holding the resolved caller identity.
///
/// # Examples
/// ```
/// use accounts::domain::{IdentityContext, UserId};
///
/// let id = UserId::new(3).unwrap();
/// assert_eq!(IdentityContext::authenticated(id).resolve_identity(), Some(id));
/// assert_eq!(IdentityContext::anonymous().resolve_identity(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityContext {
    caller: Option<UserId>,
}

impl IdentityContext {
    /// Context for a request carrying no (valid) credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { caller: None }
    }

    /// Context for a request whose token resolved to `user_id`.
    ///
    /// [`UserId::UNASSIGNED`] never names a caller; it yields an anonymous
    /// context.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        if user_id.is_assigned() {
            Self {
                caller: Some(user_id),
            }
        } else {
            Self::anonymous()
        }
    }

    /// Return the caller identity, if any. Pure read.
    #[must_use]
    pub const fn resolve_identity(&self) -> Option<UserId> {
        self.caller
    }
}

impl From<Option<UserId>> for IdentityContext {
    fn from(caller: Option<UserId>) -> Self {
        match caller {
            Some(user_id) => Self::authenticated(user_id),
            None => Self::anonymous(),
        }
    }
}

/// Authorisation gate for identity-scoped operations.
///
/// Returns the caller identity or fails with
/// [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized).
pub fn require_identity(context: &IdentityContext) -> Result<UserId, Error> {
    context
        .resolve_identity()
        .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
}
