//! API-facing projection of the user record.
//!
//! [`ApiUser::from`] is the single mapping rule from [`User`] to what callers
//! see. It drops credential material and narrows the identifier to the public
//! numeric type. Every operation that returns a user goes through it.

use serde::{Deserialize, Serialize};

use super::{IssuedToken, Role, User};

/// Credential-free user representation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    /// Public numeric identifier.
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Authorisation role.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
}

impl From<&User> for ApiUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_public(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().to_owned(),
            role: user.role(),
            active: user.active(),
        }
    }
}

/// Successful login or registration result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthPayload {
    /// Bearer token bound to `user`.
    pub token: IssuedToken,
    /// The authenticated user.
    pub user: ApiUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Password, UserId};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn stored_user() -> User {
        User::new(UserId::new(9).expect("fixture id"), "grace@example.com", Password::new("pw"))
            .with_names("Grace", "Hopper")
            .with_role(Role::Admin)
            .with_active(false)
    }

    #[rstest]
    fn projection_copies_every_public_field(stored_user: User) {
        let api = ApiUser::from(&stored_user);
        assert_eq!(
            api,
            ApiUser {
                id: 9,
                first_name: "Grace".to_owned(),
                last_name: "Hopper".to_owned(),
                email: "grace@example.com".to_owned(),
                role: Role::Admin,
                active: false,
            }
        );
    }

    #[rstest]
    fn serialised_projection_carries_no_credentials(stored_user: User) {
        let value = serde_json::to_value(ApiUser::from(&stored_user)).expect("serialise");
        let object = value.as_object().expect("object");
        assert!(object.keys().all(|key| !key.to_lowercase().contains("password")));
        assert!(!value.to_string().contains("\"pw\""));
        assert_eq!(object.get("firstName"), Some(&Value::from("Grace")));
    }

    #[rstest]
    fn projection_is_deterministic(stored_user: User) {
        assert_eq!(ApiUser::from(&stored_user), ApiUser::from(&stored_user.clone()));
    }

    #[rstest]
    fn auth_payload_serialises_token_and_user(stored_user: User) {
        let payload = AuthPayload {
            token: IssuedToken::new("tok"),
            user: ApiUser::from(&stored_user),
        };
        let value = serde_json::to_value(payload).expect("serialise");
        assert_eq!(value.get("token"), Some(&json!("tok")));
        assert_eq!(value.pointer("/user/id"), Some(&json!(9)));
    }
}
