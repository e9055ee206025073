//! Partial profile update applied by the `updateUser` operation.
//!
//! ## Presence rules
//! Every field uses explicit presence: `None` leaves the stored value
//! untouched, `Some(value)` replaces it.
//! - `email: Some("")` (or only whitespace) is rejected with
//!   [`ErrorCode::InvalidRequest`](super::ErrorCode::InvalidRequest). A blank
//!   email is never silently treated as "not supplied", and an account can
//!   never end up without a login email.
//! - `first_name: Some("")` and `last_name: Some("")` clear the name.
//!
//! Applying the same patch twice yields the same record as applying it once.

use serde::Deserialize;
use serde_json::json;

use super::{Error, User};

/// Optional-field patch for the caller's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserInput {
    /// Replacement email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UpdateUserInput {
    /// Reject values the presence rules forbid before any lookup happens.
    pub fn validate(&self) -> Result<(), Error> {
        if self.email.as_deref().is_some_and(|email| email.trim().is_empty()) {
            return Err(Error::invalid_request("email must not be empty")
                .with_details(json!({ "field": "email", "code": "empty_email" })));
        }
        Ok(())
    }

    /// Apply supplied fields to `user`, leaving absent ones untouched.
    pub fn apply_to(&self, user: &mut User) -> Result<(), Error> {
        self.validate()?;
        if let Some(email) = &self.email {
            user.set_email(email.trim());
        }
        if let Some(first_name) = &self.first_name {
            user.set_first_name(first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            user.set_last_name(last_name.as_str());
        }
        Ok(())
    }

    /// Whether the patch supplies no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}
