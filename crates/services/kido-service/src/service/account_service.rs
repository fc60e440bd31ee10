//! Account service - registration, login and password changes.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, Password, User};
use forms::{FormErrors, LoginData, SignUpData};
use forms::signup::{SIGNUP_PASSWORD_MAX_LEN, SIGNUP_PASSWORD_MIN_LEN};

use crate::repository::UserRepository;

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account from a validated sign-up form
    async fn register(&self, data: SignUpData) -> AppResult<User>;

    /// Authenticate a validated login form.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    async fn login(&self, data: LoginData) -> AppResult<User>;

    /// Replace a user's password
    async fn change_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;
}

pub struct AccountManager {
    users: Arc<dyn UserRepository>,
    /// Verified against when the email is unknown, so both login failures
    /// cost one hash verification.
    decoy: Option<Password>,
}

impl AccountManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            decoy: Password::hash("kido-decoy-password").ok(),
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, data: SignUpData) -> AppResult<User> {
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let user = User::new(NewUser {
            first_name: data.first_name,
            last_name: data.last_name,
            email: Some(data.email),
            password: Some(data.password),
        })?;

        let user = self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, data: LoginData) -> AppResult<User> {
        let user = match self.users.find_by_email(&data.email).await? {
            Some(user) => user,
            None => {
                if let Some(decoy) = &self.decoy {
                    let _ = decoy.verify(&data.password);
                }
                tracing::warn!("Login attempt for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !user.check_password(&data.password) {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn change_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()> {
        let len = new_password.chars().count() as u64;
        if !(SIGNUP_PASSWORD_MIN_LEN..=SIGNUP_PASSWORD_MAX_LEN).contains(&len) {
            return Err(FormErrors::single(
                "password",
                format!(
                    "Field must be between {} and {} characters long.",
                    SIGNUP_PASSWORD_MIN_LEN, SIGNUP_PASSWORD_MAX_LEN
                ),
            )
            .into());
        }

        let mut user = self.users.find_by_id(user_id).await?.ok_or_not_found()?;
        user.set_password(new_password)?;
        self.users.update(&user).await?;

        tracing::info!(%user_id, "Password changed");
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }
}
