pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::HashingAlgorithm;
pub use hasher::PasswordHasher;
pub use hasher::DEFAULT_BCRYPT_COST;
pub use hasher::MAX_PASSWORD_BYTES;
