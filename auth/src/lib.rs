//! Authentication primitives library
//!
//! Provides the two leaf components of credential authentication:
//! - Password hashing (bcrypt by default, Argon2id supported) with
//!   self-describing salted digests
//! - Compact signed bearer tokens (HS256) carrying a subject and issue time
//!
//! Neither component knows about accounts or storage; services compose them
//! with their own persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingAlgorithm, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_algorithm(HashingAlgorithm::Bcrypt { cost: 4 }).unwrap();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! assert!(!hasher.verify("not_my_password", &digest).unwrap());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenService;
//!
//! let service = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = service.issue("user123").unwrap();
//! let claims = service.validate(&token).unwrap();
//! assert_eq!(claims.subject(), "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::HashingAlgorithm;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::DEFAULT_BCRYPT_COST;
pub use password::MAX_PASSWORD_BYTES;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenService;
