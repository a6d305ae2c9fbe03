use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Issues and validates compact signed bearer tokens.
///
/// Tokens are JWS compact strings signed with HS256 (HMAC with SHA-256)
/// over a process-wide shared secret. The service holds no mutable state and
/// can be shared freely between tasks.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiration: Option<Duration>,
}

impl TokenService {
    /// Create a new token service with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenService configured with HS256 and no token expiry
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Changing the secret invalidates every token issued with the old one
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: None,
        }
    }

    /// Give issued tokens a limited lifetime.
    ///
    /// Tokens issued afterwards carry an `exp` claim and are rejected by
    /// [`TokenService::validate`] once it has passed.
    pub fn with_expiration(mut self, lifetime: Duration) -> Self {
        self.expiration = Some(lifetime);
        self
    }

    pub fn expiration(&self) -> Option<Duration> {
        self.expiration
    }

    /// Issue a token for a subject, stamped with the current time.
    ///
    /// # Arguments
    /// * `subject` - Identifier of the account the token stands in for
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for a subject with an explicit issuance time.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let mut claims = TokenClaims::new(subject, issued_at);
        if let Some(lifetime) = self.expiration {
            claims = claims.with_expiration((issued_at + lifetime).timestamp());
        }

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and decode its claims.
    ///
    /// The signature is checked before any claim is deserialized, so the
    /// returned subject can be trusted.
    ///
    /// # Arguments
    /// * `token` - Token string exactly as presented by the caller
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be decoded or lacks a subject
    /// * `InvalidSignature` - Signature does not match, or algorithm is not HS256
    /// * `Expired` - Token carries an `exp` claim that has passed
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Tokens without 'exp' stay valid indefinitely
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.sub.is_empty() {
            return Err(TokenError::Malformed("missing subject".to_string()));
        }

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}
