//! User domain record.
//!
//! The record is owned by the [`UserService`](crate::domain::ports::UserService)
//! collaborator and includes credential material, so it deliberately does not
//! implement `Serialize`. Callers only ever see the projection built by
//! [`ApiUser::from`](crate::domain::ApiUser).

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors raised while constructing user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier does not fit the public numeric range.
    #[error("user id must be between 0 and {max}")]
    IdOutOfRange {
        /// Largest identifier accepted.
        max: u32,
    },
}

/// Numeric user identifier.
///
/// ## Invariants
/// - The value fits in a non-negative `i32`, so the public projection never
///   truncates it.
/// - `0` is reserved for records that have not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UserId(u32);

impl UserId {
    /// Placeholder carried by a record before the user service assigns an id.
    pub const UNASSIGNED: Self = Self(0);

    /// Largest identifier representable in the public API.
    pub const MAX: u32 = 2_147_483_647;

    /// Validate and construct an identifier from its stored form.
    ///
    /// # Examples
    /// ```
    /// use accounts::domain::UserId;
    ///
    /// let id = UserId::new(42).expect("in range");
    /// assert_eq!(id.get(), 42);
    /// assert!(UserId::new(u32::MAX).is_err());
    /// ```
    pub fn new(raw: u32) -> Result<Self, UserValidationError> {
        if raw > Self::MAX {
            return Err(UserValidationError::IdOutOfRange { max: Self::MAX });
        }
        Ok(Self(raw))
    }

    /// Validate an identifier supplied through the public API.
    pub fn from_public(raw: i32) -> Result<Self, UserValidationError> {
        u32::try_from(raw)
            .map_err(|_| UserValidationError::IdOutOfRange { max: Self::MAX })
            .and_then(Self::new)
    }

    /// Raw stored value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Identifier narrowed to the public numeric type.
    #[must_use]
    pub fn to_public(self) -> i32 {
        // The constructor bounds the value, so the fallback is unreachable.
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Whether the user service has assigned this identifier.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authorisation role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account.
    #[default]
    User,
    /// Administrative account.
    Admin,
}

/// Opaque password material.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap caller-supplied or stored password material.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the raw material for comparison by the user service.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether no password material was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Full internal user record, including credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    password: Password,
    role: Role,
    active: bool,
}

impl User {
    /// Build a persisted user record.
    ///
    /// Names start empty, the role defaults to [`Role::User`] and the account
    /// is active; use the `with_*` helpers to adjust.
    pub fn new(id: UserId, email: impl Into<String>, password: Password) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            password,
            role: Role::default(),
            active: true,
        }
    }

    /// Build the shell handed to the user service on registration.
    ///
    /// Only email and password are populated; everything else is left at its
    /// zero value until the service fills in server-assigned fields.
    ///
    /// # Examples
    /// ```
    /// use accounts::domain::{Password, User};
    ///
    /// let shell = User::registration("ada@example.com", Password::new("pw"));
    /// assert!(!shell.id().is_assigned());
    /// assert!(!shell.active());
    /// ```
    pub fn registration(email: impl Into<String>, password: Password) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            password,
            role: Role::default(),
            active: false,
        }
    }

    /// Set both name fields.
    #[must_use]
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Fill in the fields a user service assigns when persisting a record.
    pub fn assign_server_fields(&mut self, id: UserId, role: Role, active: bool) {
        self.id = id;
        self.role = role;
        self.active = active;
    }

    /// Replace the email address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace the first name.
    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    /// Replace the last name.
    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Email address used for login.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password material.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Authorisation role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the account is active.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }
}
