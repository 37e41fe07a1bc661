use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

/// Identity claims carried by a signed bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub uname: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(uid: i64, uname: impl Into<String>, ttl_hours: i64) -> Self {
        let now = Utc::now();

        Self {
            uid,
            uname: uname.into(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

pub fn sign_token(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature, structure and expiry in one shot. Binary outcome: any
/// failed sub-check yields `InvalidToken`.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn token_round_trip() {
        let claims = Claims::new(42, "marge", 1);
        let token = sign_token(&claims, SECRET).unwrap();

        let verified = verify_token(&token, SECRET).unwrap();
        assert_eq!(verified.uid, 42);
        assert_eq!(verified.uname, "marge");
        assert_eq!(verified.exp, claims.exp);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            uid: 42,
            uname: "marge".into(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = sign_token(&claims, SECRET).unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = sign_token(&Claims::new(42, "marge", 1), SECRET).unwrap();
        let mut tampered = token.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(verify_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = sign_token(&Claims::new(42, "marge", 1), SECRET).unwrap();

        assert!(verify_token(&token, b"ffffffffffffffffffffffffffffffff").is_err());
    }

    #[test]
    fn token_without_subject_claims_is_rejected() {
        #[derive(Serialize)]
        struct Partial {
            iat: i64,
            exp: i64,
        }

        let now = Utc::now();
        let partial = Partial {
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &partial, &EncodingKey::from_secret(SECRET)).unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not.a.token", SECRET).is_err());
        assert!(verify_token("", SECRET).is_err());
    }
}
