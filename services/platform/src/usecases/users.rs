//! User registration and authentication use cases

use tracing::info;

use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserRole};
use crate::repositories::UserRepository;
use crate::validation::{validate_email, validate_name, validate_password};

/// Registration request
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Register a new user; the same email may register once per role
#[derive(Clone)]
pub struct RegisterUserUseCase {
    users: UserRepository,
}

impl RegisterUserUseCase {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: RegisterUserInput) -> Result<User> {
        let email = input.email.trim().to_lowercase();

        validate_name(&input.name)?;
        validate_email(&email)?;
        validate_password(&input.password)?;

        if self
            .users
            .find_by_email_and_role(&email, input.role)
            .await?
            .is_some()
        {
            return Err(Error::EmailAlreadyRegistered {
                email,
                role: input.role,
            });
        }

        let user = self
            .users
            .create(&NewUser {
                name: input.name.trim().to_string(),
                email,
                password: input.password,
                role: input.role,
            })
            .await?;

        info!("Registered user {} with role {}", user.id, user.role);
        Ok(user)
    }
}

/// Authentication request
#[derive(Debug, Clone)]
pub struct AuthenticateUserInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Authenticate a user by email, password and role
#[derive(Clone)]
pub struct AuthenticateUserUseCase {
    users: UserRepository,
}

impl AuthenticateUserUseCase {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: AuthenticateUserInput) -> Result<User> {
        let email = input.email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email_and_role(&email, input.role)
            .await?
            .ok_or_else(|| Error::UserNotFound {
                email: email.clone(),
                role: input.role,
            })?;

        if !self.users.verify_password(&user, &input.password).await? {
            return Err(Error::WrongPassword);
        }

        Ok(user)
    }
}
