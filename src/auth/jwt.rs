//! JWT token issuance and verification
//!
//! Tokens are HS256-signed and carry the user id as `sub`. Validity defaults
//! to 30 days; expired or tampered tokens fail verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::HearthError;

/// Claims embedded in every hearth token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Email at issue time (informational)
    pub email: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and verifies bearer tokens for the HTTP layer.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenService {
    pub fn new(secret: &str, validity_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(validity_days),
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, HearthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| HearthError::Auth(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Signature and expiry are both checked; any failure maps to a generic
    /// auth error so callers never leak why a token was rejected.
    pub fn verify(&self, token: &str) -> Result<Claims, HearthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| HearthError::Auth("Invalid token".to_string()))
    }
}

/// Extract the bearer token from an `Authorization` header value.
pub fn extract_token_from_header(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 30)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let token = svc.issue("user-1", "fern@example.com").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "fern@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service();
        let mut token = svc.issue("user-1", "fern@example.com").unwrap();
        token.push('x');

        assert!(svc.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative validity backdates the expiry past the default leeway
        let backdated = TokenService::new("unit-test-secret", -2);
        let token = backdated.issue("user-1", "fern@example.com").unwrap();

        assert!(backdated.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue("user-1", "fern@example.com").unwrap();
        let other = TokenService::new("a-different-secret", 30);

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(
            extract_token_from_header(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_header(Some("Bearer ")), None);
        assert_eq!(extract_token_from_header(Some("Basic abc")), None);
        assert_eq!(extract_token_from_header(None), None);
    }
}
