//! Authentication primitives: caller-supplied credentials and issued tokens.
//!
//! Inbound payload parsing stays outside the domain; adapters build
//! [`Credentials`] through [`Credentials::try_from_parts`] before calling the
//! resolvers.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Password;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated email and password pair used for login and registration.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace so the
///   comparison sees exactly what was typed.
///
/// # Examples
/// ```
/// use accounts::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" ada@example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Password,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Password::new(password),
        })
    }

    /// Email suitable for user lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Split into owned parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Password) {
        (self.email, self.password)
    }
}

/// Opaque bearer token produced by the token issuer.
///
/// The domain never inspects the contents. `Debug` is redacted so tokens do
/// not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken(String);

impl IssuedToken {
    /// Wrap an issuer-produced token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the token for transport.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IssuedToken(<redacted>)")
    }
}

impl Serialize for IssuedToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("ada@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = Credentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada@example.com  ", "secret")]
    #[case("grace@example.com", " padded password ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(email, password).expect("valid inputs");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password().expose(), password);
    }

    #[rstest]
    fn token_debug_is_redacted_but_serialises_raw() {
        let token = IssuedToken::new("abc123");
        assert!(!format!("{token:?}").contains("abc123"));
        assert_eq!(
            serde_json::to_value(&token).expect("serialise token"),
            serde_json::json!("abc123")
        );
    }
}
