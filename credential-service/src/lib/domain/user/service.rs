use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordDigest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserRepository;

/// Credential store implementation.
///
/// Owns user records through an injected repository and turns plaintext
/// passwords into digests before anything reaches storage.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured from process settings
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR> CredentialStore for UserService<UR>
where
    UR: UserRepository,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        // An address that fails validation cannot belong to any stored user
        let email = match EmailAddress::new(email.to_string()) {
            Ok(email) => email,
            Err(_) => return Ok(None),
        };

        self.repository.find_by_email(&email).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.repository.find_by_id(id).await
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand { email, password } = command;

        let hasher = self.password_hasher.clone();
        let digest = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::Hashing(format!("Hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            email,
            password_digest: PasswordDigest::new(digest),
            created_at: Utc::now(),
        };

        let created_user = self.repository.insert(user).await.map_err(|e| {
            if let UserError::EmailAlreadyExists(email) = &e {
                tracing::warn!(email = %email, "Signup rejected: email already registered");
            }
            e
        })?;

        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }
}
