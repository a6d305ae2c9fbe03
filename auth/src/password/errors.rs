use thiserror::Error;

/// Error type for password hashing and verification.
///
/// A password that simply does not match its digest is not an error;
/// `verify` reports that as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    #[error("Password exceeds {max} bytes")]
    TooLong { max: usize },

    #[error("Invalid bcrypt cost {cost}: must be between {min} and {max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },
}
