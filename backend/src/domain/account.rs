//! User accounts and login credentials.

use std::fmt;

use zeroize::Zeroizing;

/// Database identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Tier assigned to accounts created through registration.
pub const DEFAULT_TIER: &str = "free";

/// Authenticated account summary returned by login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    tier: String,
}

impl UserAccount {
    /// Build an account summary; a blank tier becomes [`DEFAULT_TIER`].
    pub fn new(id: UserId, tier: impl Into<String>) -> Self {
        let tier = tier.into();
        let tier = if tier.trim().is_empty() {
            DEFAULT_TIER.to_owned()
        } else {
            tier
        };
        Self { id, tier }
    }

    /// Account identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Subscription tier.
    pub fn tier(&self) -> &str {
        &self.tier
    }
}

/// Validation errors for [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain '@'")]
    MalformedEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Email and password pair supplied to register or login.
///
/// The password is wiped from memory on drop.
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate and normalise credentials. Emails are trimmed and lowercased.
    ///
    /// # Examples
    /// ```
    /// use lens_backend::domain::Credentials;
    ///
    /// let creds = Credentials::try_new(" Ada@Example.com ", "pw").expect("valid");
    /// assert_eq!(creds.email(), "ada@example.com");
    /// ```
    pub fn try_new(
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsValidationError> {
        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if !email.contains('@') {
            return Err(CredentialsValidationError::MalformedEmail);
        }
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plain-text password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
