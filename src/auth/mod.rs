pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::models::Role;

/// Identity carried by every bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, role: Role) -> Self {
        let now = Utc::now();
        let expiry_days = config::config().security.jwt_expiry_days;

        Self {
            sub: user_id,
            email,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::days(expiry_days)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("token generation failed: {0}")]
    Generation(#[from] jsonwebtoken::errors::Error),
}

/// Sign a token for the given claims with the configured server secret.
pub fn issue_token(claims: &Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    sign_with_secret(claims, secret)
}

/// Decode and validate a bearer token. Malformed, tampered and expired
/// tokens all come back as None; this never surfaces an error to callers.
pub fn verify_token(token: &str) -> Option<Claims> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return None;
    }

    decode_with_secret(token, secret)
}

fn sign_with_secret(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn decode_with_secret(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims_expiring_in(seconds: i64) -> Claims {
        let now = Utc::now();
        Claims {
            sub: Uuid::new_v4(),
            email: "shopper@example.com".to_string(),
            role: Role::Customer,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(seconds)).timestamp(),
        }
    }

    #[test]
    fn sign_then_decode_round_trips_identity() {
        let claims = claims_expiring_in(3600);
        let token = sign_with_secret(&claims, SECRET).unwrap();

        let decoded = decode_with_secret(&token, SECRET).expect("valid token");
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, claims.email);
        assert_eq!(decoded.role, Role::Customer);
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(decode_with_secret("not-a-jwt", SECRET).is_none());
        assert!(decode_with_secret("", SECRET).is_none());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign_with_secret(&claims_expiring_in(3600), SECRET).unwrap();
        assert!(decode_with_secret(&token, "another-secret").is_none());
    }

    #[test]
    fn expired_token_is_invalid() {
        // Well past the default decode leeway
        let token = sign_with_secret(&claims_expiring_in(-3600), SECRET).unwrap();
        assert!(decode_with_secret(&token, SECRET).is_none());
    }

    #[test]
    fn tampered_token_is_invalid() {
        let token = sign_with_secret(&claims_expiring_in(3600), SECRET).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(decode_with_secret(&tampered, SECRET).is_none());
    }
}
