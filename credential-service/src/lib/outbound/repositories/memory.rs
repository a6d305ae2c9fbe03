use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct UserTable {
    /// Map of user_id -> User
    users: HashMap<UserId, User>,
    /// Map of normalized email -> user_id, the uniqueness index
    emails: HashMap<String, UserId>,
}

/// Process-local user storage.
///
/// Email uniqueness is checked and recorded under a single write guard, so
/// concurrent inserts within one process behave like a database unique
/// constraint. Nothing survives a restart; intended for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let mut table = self.table.write().await;

        if table.emails.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        table
            .emails
            .insert(user.email.as_str().to_string(), user.id);
        table.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.table.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let table = self.table.read().await;

        Ok(table
            .emails
            .get(email.as_str())
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        let mut table = self.table.write().await;

        match table.users.remove(id) {
            Some(user) => {
                table.emails.remove(user.email.as_str());
                tracing::info!(user_id = %id, "User deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
