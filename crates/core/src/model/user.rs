use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("all fields are required")]
    MissingFields,

    #[error("username '{0}' is reserved")]
    ReservedUsername(String),
}

/// Name no player may register, whatever the configured admin login is.
pub const RESERVED_ADMIN_NAME: &str = "admin";

/// A trimmed, non-empty account name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// # Errors
    ///
    /// Returns `UserError::MissingFields` if the name is blank.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingFields);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered player. The password is only ever held as a PHC hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: Username,
    pub password_hash: String,
    pub country: String,
}

/// Sign-up form input before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub country: String,
}

/// Sign-up input that passed validation; the password is still plain text here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    pub username: Username,
    pub password: String,
    pub country: String,
}

impl NewUser {
    /// Trim fields, require all three, and refuse any of the `reserved` names.
    ///
    /// The reserved comparison ignores ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `UserError::MissingFields` or `UserError::ReservedUsername`.
    pub fn validate(self, reserved: &[&str]) -> Result<ValidatedUser, UserError> {
        let password = self.password.trim();
        let country = self.country.trim();
        if password.is_empty() || country.is_empty() {
            return Err(UserError::MissingFields);
        }
        let username = Username::new(&self.username)?;
        if reserved
            .iter()
            .any(|name| username.as_str().eq_ignore_ascii_case(name.trim()))
        {
            return Err(UserError::ReservedUsername(username.as_str().to_string()));
        }

        Ok(ValidatedUser {
            username,
            password: password.to_string(),
            country: country.to_string(),
        })
    }
}
