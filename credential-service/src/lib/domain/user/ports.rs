use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for credential store operations.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up a user by email address.
    ///
    /// The address is normalized (trimmed, lowercased) before comparison.
    ///
    /// # Arguments
    /// * `email` - Raw email string as supplied by the caller
    ///
    /// # Returns
    /// Optional user entity (None if not found or not a valid address)
    ///
    /// # Errors
    /// * `Storage` - Persistence operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Look up a user by unique identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Create a new user, hashing the password before it is persisted.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Digest generation failed
    /// * `Storage` - Persistence operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
}

/// Port for the two authentication strategies and token issuance.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Password strategy: resolve a user from email and password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or the password does not match
    /// * `Hashing` - Password verification failed
    /// * `Storage` - Persistence operation failed
    async fn authenticate_password(&self, credentials: Credentials) -> Result<User, UserError>;

    /// Token strategy: resolve a user from a bearer token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged or expired
    /// * `InvalidCredentials` - Token is genuine but its subject no longer exists
    /// * `Storage` - Persistence operation failed
    async fn authenticate_token(&self, token: &str) -> Result<User, UserError>;

    /// Issue a bearer token whose subject is the user's ID.
    ///
    /// # Errors
    /// * `TokenIssuance` - Token could not be signed
    fn issue_token(&self, user: &User) -> Result<String, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce email uniqueness atomically: two concurrent
/// inserts with the same email must never both succeed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to insert
    ///
    /// # Returns
    /// Inserted user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Persistence operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Persistence operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Remove user from storage.
    ///
    /// Not reachable through the HTTP surface; account removal is an
    /// administrative action.
    ///
    /// # Returns
    /// True if a user was removed, false if none existed
    ///
    /// # Errors
    /// * `Storage` - Persistence operation failed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
}
