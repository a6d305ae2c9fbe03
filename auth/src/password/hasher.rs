use std::sync::Arc;
use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as Argon2Error;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Longest password bcrypt reads in full; later bytes would be ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];
const ARGON2_PREFIX: &str = "$argon2";

// Hashed once per hasher and verified against when the account does not exist.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalization";

/// Adaptive hashing algorithm used for new digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashingAlgorithm {
    /// bcrypt with the given work factor (log2 of the round count).
    Bcrypt { cost: u32 },
    /// Argon2id with the crate's default parameters.
    Argon2id,
}

impl Default for HashingAlgorithm {
    fn default() -> Self {
        HashingAlgorithm::Bcrypt {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Produces self-describing digests (algorithm, cost, salt and hash in one
/// string) so that verification never needs a side lookup. Verification
/// dispatches on the digest prefix, which means a hasher configured for one
/// algorithm still accepts digests created with the other.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    algorithm: HashingAlgorithm,
    dummy_digest: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    /// Create a password hasher using bcrypt with the default cost.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            algorithm: HashingAlgorithm::default(),
            dummy_digest: Arc::new(OnceLock::new()),
        }
        .with_dummy_digest()
    }

    /// Create a password hasher for a specific algorithm.
    ///
    /// # Arguments
    /// * `algorithm` - Algorithm and parameters used for new digests
    ///
    /// # Errors
    /// * `InvalidCost` - bcrypt cost outside 4..=31
    pub fn with_algorithm(algorithm: HashingAlgorithm) -> Result<Self, PasswordError> {
        if let HashingAlgorithm::Bcrypt { cost } = algorithm {
            if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                return Err(PasswordError::InvalidCost {
                    cost,
                    min: MIN_BCRYPT_COST,
                    max: MAX_BCRYPT_COST,
                });
            }
        }

        Ok(Self {
            algorithm,
            dummy_digest: Arc::new(OnceLock::new()),
        }
        .with_dummy_digest())
    }

    // The first unknown-account signin must not also pay for this hash
    fn with_dummy_digest(self) -> Self {
        self.dummy_digest
            .get_or_init(|| self.hash(DUMMY_PASSWORD).unwrap_or_default());
        self
    }

    pub fn algorithm(&self) -> HashingAlgorithm {
        self.algorithm
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Self-describing digest (`$2b$...` for bcrypt, PHC `$argon2id$...` for Argon2id)
    ///
    /// # Errors
    /// * `TooLong` - bcrypt is selected and the password exceeds 72 bytes
    /// * `HashingFailed` - Entropy source or hash computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.algorithm {
            HashingAlgorithm::Bcrypt { cost } => {
                if password.len() > MAX_PASSWORD_BYTES {
                    return Err(PasswordError::TooLong {
                        max: MAX_PASSWORD_BYTES,
                    });
                }

                bcrypt::hash(password, cost)
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
            HashingAlgorithm::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);

                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored digest.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored digest produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// True if password matches, false otherwise. A password longer than
    /// 72 bytes never matches a bcrypt digest, since none could have been
    /// created from it.
    ///
    /// # Errors
    /// * `MalformedDigest` - Digest is not a recognizable bcrypt or Argon2 string
    /// * `VerificationFailed` - Hash computation failed
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        if BCRYPT_PREFIXES.iter().any(|prefix| digest.starts_with(prefix)) {
            if password.len() > MAX_PASSWORD_BYTES {
                return Ok(false);
            }

            return bcrypt::verify(password, digest)
                .map_err(|e| PasswordError::MalformedDigest(e.to_string()));
        }

        if digest.starts_with(ARGON2_PREFIX) {
            let parsed_hash = PasswordHash::new(digest)
                .map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

            return match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(Argon2Error::Password) => Ok(false),
                Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
            };
        }

        Err(PasswordError::MalformedDigest(
            "unrecognized algorithm identifier".to_string(),
        ))
    }

    /// Spend one verification's worth of work without a stored digest.
    ///
    /// Called when the account being authenticated does not exist, so that
    /// the caller cannot tell a missing account from a wrong password by
    /// response time.
    pub fn dummy_verify(&self, password: &str) {
        let digest = self
            .dummy_digest
            .get_or_init(|| self.hash(DUMMY_PASSWORD).unwrap_or_default());

        let _ = self.verify(password, digest);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
