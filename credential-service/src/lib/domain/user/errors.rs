use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password must be at most {max} bytes")]
    TooLong { max: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Infrastructure errors
    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token issuance error: {0}")]
    TokenIssuance(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl UserError {
    /// Whether the error stems from the caller's input rather than from
    /// infrastructure.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            UserError::Hashing(_) | UserError::TokenIssuance(_) | UserError::Storage(_)
        )
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}

impl From<auth::TokenError> for UserError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::EncodingFailed(_) => UserError::TokenIssuance(err.to_string()),
            auth::TokenError::Malformed(_)
            | auth::TokenError::InvalidSignature
            | auth::TokenError::Expired => UserError::InvalidToken(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_invalid_token() {
        let err: UserError = auth::TokenError::InvalidSignature.into();
        assert!(matches!(err, UserError::InvalidToken(_)));

        let err: UserError = auth::TokenError::Expired.into();
        assert!(matches!(err, UserError::InvalidToken(_)));

        let err: UserError = auth::TokenError::EncodingFailed("boom".to_string()).into();
        assert!(matches!(err, UserError::TokenIssuance(_)));
    }

    #[test]
    fn test_client_and_server_errors_are_distinguished() {
        assert!(UserError::InvalidCredentials.is_client_error());
        assert!(UserError::EmailAlreadyExists("a@x.com".to_string()).is_client_error());
        assert!(UserError::InvalidEmail(EmailError::Empty).is_client_error());
        assert!(!UserError::Storage("connection reset".to_string()).is_client_error());
        assert!(!UserError::Hashing("no entropy".to_string()).is_client_error());
    }
}
