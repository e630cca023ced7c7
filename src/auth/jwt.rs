//! JWT token issuance and verification

use crate::core::error::{BoardError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Uniform message for every verification failure; expired, malformed and
/// forged tokens must be indistinguishable to the caller.
const INVALID_TOKEN: &str = "Could not validate credentials";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Stateless token issuer/verifier
///
/// Holds the signing secret and TTL as immutable state, initialized once at
/// startup and shared process-wide through AppState.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the shared secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a signed token carrying the username as subject
    pub fn issue(&self, username: &str) -> Result<String> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(
                chrono::Duration::from_std(self.ttl)
                    .map_err(|e| BoardError::AuthenticationError(e.to_string()))?,
            )
            .ok_or_else(|| {
                BoardError::AuthenticationError("Failed to calculate expiration".to_string())
            })?
            .timestamp() as usize;

        let claims = Claims {
            sub: username.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BoardError::AuthenticationError(format!("Failed to generate token: {}", e)))
    }

    /// Verify a token and return its subject
    ///
    /// Checks signature, presence of the subject claim, and expiry. Every
    /// failure collapses to the same AuthenticationError; the concrete cause
    /// is only visible in debug logs.
    pub fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => {
                tracing::debug!(cause = %e, "Token verification failed");
                Err(BoardError::AuthenticationError(INVALID_TOKEN.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::from_secs(30 * 60))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_expired_token_fails_despite_valid_signature() {
        let tokens = service();

        let claims = Claims {
            sub: "alice".to_string(),
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_fails() {
        let tokens = service();
        let other = TokenService::new("other-secret", Duration::from_secs(30 * 60));

        let token = other.issue("alice").unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_token_missing_subject_fails() {
        #[derive(Serialize)]
        struct NoSub {
            exp: usize,
        }

        let tokens = service();
        let claims = NoSub {
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        let tokens = service();
        assert!(tokens.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let tokens = service();
        let other = TokenService::new("other-secret", Duration::from_secs(30 * 60));

        let forged = other.issue("alice").unwrap();
        let garbage = "not-a-jwt".to_string();

        let forged_err = tokens.verify(&forged).unwrap_err().to_string();
        let garbage_err = tokens.verify(&garbage).unwrap_err().to_string();
        assert_eq!(forged_err, garbage_err);
    }
}
