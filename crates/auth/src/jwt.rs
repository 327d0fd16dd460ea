use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};
use crate::model::Role;

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration time (unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims expiring `ttl_seconds` from now.
    pub fn new(subject: String, role: Role, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(ttl_seconds);

        Self {
            sub: subject,
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::default();
    // The default 60s leeway would blur the expiry boundary.
    validation.leeway = 0;
    validation
}

/// Mint a signed session token for an account.
pub fn generate_token(subject: &str, role: Role, secret: &str, ttl_seconds: i64) -> Result<String> {
    let claims = Claims::new(subject.to_string(), role, ttl_seconds);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
}

/// Validate a session token and return its claims.
///
/// Rejects bad signatures, expired tokens, and tokens with missing or
/// malformed claims. The expired/invalid distinction exists for logging;
/// callers at the HTTP boundary collapse both to an unauthorized response.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_validation() {
        let secret = "test_secret";

        let token = generate_token("user@example.com", Role::User, secret, 1800).unwrap();
        let claims = validate_token(&token, secret).unwrap();

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_secret() {
        let token = generate_token("user@example.com", Role::User, "correct_secret", 1800).unwrap();
        let result = validate_token(&token, "wrong_secret");

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let secret = "test_secret";

        // Already past its expiry; zero leeway means immediate rejection.
        let token = generate_token("user@example.com", Role::User, secret, -60).unwrap();
        let result = validate_token(&token, secret);

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_token_near_expiry_boundary() {
        let secret = "test_secret";

        // A token with most of its 30-minute window left is accepted.
        let token = generate_token("user@example.com", Role::Admin, secret, 60).unwrap();
        assert!(validate_token(&token, secret).is_ok());
    }

    #[test]
    fn test_missing_role_claim() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            iat: i64,
            exp: i64,
        }

        let secret = "test_secret";
        let now = Utc::now().timestamp();
        let partial = Partial {
            sub: "user@example.com".to_string(),
            iat: now,
            exp: now + 1800,
        };
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_token(&token, secret),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            validate_token("not.a.jwt", "secret"),
            Err(AuthError::InvalidToken)
        ));
    }
}
