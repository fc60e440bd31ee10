//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{USER_EMAIL_MAX_LEN, USER_NAME_MAX_LEN};
use crate::constraints::{max_len, max_len_opt, required};
use crate::error::DomainResult;
use crate::password::Password;

/// Account holder.
///
/// `password` only ever holds a [`Password`] hash. The plaintext handed to
/// [`User::new`] or [`User::set_password`] is dropped once hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub password: Option<Password>,
}

impl User {
    /// Create a new user with a fresh id, hashing the password if one is given.
    pub fn new(data: NewUser) -> DomainResult<Self> {
        data.check_constraints()?;

        let password = data.password.as_deref().map(Password::hash).transpose()?;

        Ok(Self {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password,
        })
    }

    /// Replace the stored hash with a hash of `new_password`.
    pub fn set_password(&mut self, new_password: &str) -> DomainResult<()> {
        self.password = Some(Password::hash(new_password)?);
        Ok(())
    }

    /// Check a candidate password against the stored hash.
    ///
    /// A user without a stored password never authenticates.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password
            .as_ref()
            .map(|p| p.verify(candidate))
            .unwrap_or(false)
    }

    /// Stored hash as it goes to the `password` column.
    pub fn password_hash(&self) -> Option<&str> {
        self.password.as_ref().map(Password::as_str)
    }
}

/// User creation data.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// Plaintext; hashed by [`User::new`]
    pub password: Option<String>,
}

impl NewUser {
    /// Check the values against the `user` table's columns.
    pub fn check_constraints(&self) -> DomainResult<()> {
        required("first_name", &self.first_name)?;
        max_len("first_name", &self.first_name, USER_NAME_MAX_LEN)?;
        required("last_name", &self.last_name)?;
        max_len("last_name", &self.last_name, USER_NAME_MAX_LEN)?;
        max_len_opt("email", self.email.as_deref(), USER_EMAIL_MAX_LEN)
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
