use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticationPort;
use crate::user::ports::CredentialStore;

/// Authentication coordinator combining the credential store, password
/// verification and bearer tokens.
///
/// The two strategies share no state; the request-handling layer picks one
/// by route.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    credential_store: Arc<CS>,
    password_hasher: PasswordHasher,
    token_service: Arc<TokenService>,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `credential_store` - Store used to resolve users
    /// * `password_hasher` - Hasher used to verify presented passwords
    /// * `token_service` - Issuer and validator of bearer tokens
    pub fn new(
        credential_store: Arc<CS>,
        password_hasher: PasswordHasher,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            credential_store,
            password_hasher,
            token_service,
        }
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| UserError::Hashing(format!("Verification task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn burn_verification(&self, password: String) -> Result<(), UserError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.dummy_verify(&password))
            .await
            .map_err(|e| UserError::Hashing(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl<CS> AuthenticationPort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn authenticate_password(&self, credentials: Credentials) -> Result<User, UserError> {
        let Credentials { email, password } = credentials;

        let user = match self.credential_store.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.burn_verification(password).await?;
                tracing::debug!("Password authentication failed: unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        let digest = user.password_digest.as_str().to_string();
        if !self.verify_password(password, digest).await? {
            tracing::warn!(user_id = %user.id, "Password authentication failed: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.id, "Password authentication succeeded");
        Ok(user)
    }

    async fn authenticate_token(&self, token: &str) -> Result<User, UserError> {
        let claims = self.token_service.validate(token).map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            UserError::from(e)
        })?;

        let user_id = UserId::from_string(claims.subject())
            .map_err(|e| UserError::InvalidToken(format!("Invalid subject: {}", e)))?;

        match self.credential_store.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                Err(UserError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, UserError> {
        self.token_service
            .issue(&user.id.to_string())
            .map_err(UserError::from)
    }
}
