use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use quiz_core::model::{NewUser, RESERVED_ADMIN_NAME, UserAccount, Username};
use storage::repository::{StorageError, UserRepository};

use crate::error::AuthError;

/// Administrator login configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("admin", "admin")
    }
}

/// Who is signed in after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin(Username),
    Player(Username),
}

impl Session {
    #[must_use]
    pub fn username(&self) -> &Username {
        match self {
            Session::Admin(name) | Session::Player(name) => name,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin(_))
    }
}

/// Registers players and checks logins.
#[derive(Clone)]
pub struct AuthService {
    admin: AdminCredentials,
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(admin: AdminCredentials, users: Arc<dyn UserRepository>) -> Self {
        Self { admin, users }
    }

    #[must_use]
    pub fn admin_username(&self) -> &str {
        self.admin.username()
    }

    /// Create a player account. The password is stored as an argon2 hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` or `AuthError::ReservedUsername` for
    /// invalid input, `AuthError::UsernameTaken` for duplicates, and
    /// `AuthError::Storage` if persistence fails.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        country: &str,
    ) -> Result<Username, AuthError> {
        let draft = NewUser {
            username: username.to_string(),
            password: password.to_string(),
            country: country.to_string(),
        };
        let user = draft.validate(&[RESERVED_ADMIN_NAME, self.admin.username()])?;
        let account = UserAccount {
            username: user.username.clone(),
            password_hash: hash_password(&user.password)?,
            country: user.country,
        };

        match self.users.insert_user(&account).await {
            Ok(()) => {
                log::info!("registered user {}", account.username);
                Ok(account.username)
            }
            Err(StorageError::Conflict) => {
                Err(AuthError::UsernameTaken(account.username.as_str().to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Authenticate either the configured administrator or a player.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` when either field is blank,
    /// `AuthError::InvalidAdminPassword` for a wrong admin password,
    /// `AuthError::InvalidCredentials` for unknown players or wrong passwords,
    /// and `AuthError::Storage` if the lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let password = password.trim();
        let username = Username::new(username).map_err(|_| AuthError::MissingFields)?;
        if password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        if username.as_str() == self.admin.username {
            if password == self.admin.password {
                return Ok(Session::Admin(username));
            }
            log::warn!("rejected admin login");
            return Err(AuthError::InvalidAdminPassword);
        }

        let Some(account) = self.users.get_user(&username).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if verify_password(&account.password_hash, password) {
            Ok(Session::Player(account.username))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
