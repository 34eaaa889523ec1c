//! JWT token service
//!
//! Token generation and verification for the operator session.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session length matches what the UI has always used: 7 days.
const DEFAULT_EXPIRATION_MINUTES: i64 = 7 * 24 * 60;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, generating an ephemeral key (sessions won't survive a restart)");
            generate_secret()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_EXPIRATION_MINUTES),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "manzanos-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "manzanos-app".to_string()),
        }
    }
}

/// Generate a random printable secret (hex of 32 random bytes)
fn generate_secret() -> String {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    // SystemRandom only fails if the OS RNG is broken
    rng.fill(&mut key).expect("OS RNG failure");
    key.iter().map(|b| format!("{b:02x}")).collect()
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the operator)
    pub sub: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

impl From<JwtError> for crate::utils::AppError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::ExpiredToken => Self::InvalidToken("Token expired".to_string()),
            JwtError::InvalidToken(msg) => Self::InvalidToken(msg),
            JwtError::GenerationFailed(msg) => Self::Internal(msg),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for the operator session. Returns the token and its
    /// expiration timestamp (seconds).
    pub fn generate_token(&self, sub: &str) -> Result<(String, i64), JwtError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: sub.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))?;
        Ok((token, claims.exp))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the bearer token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            expiration_minutes: 60,
            issuer: "manzanos-server".to_string(),
            audience: "manzanos-app".to_string(),
        })
    }

    #[test]
    fn round_trip() {
        let svc = test_service();
        let (token, exp) = svc.generate_token("operador").unwrap();
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "operador");
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn tampered_token_rejected() {
        let svc = test_service();
        let (token, _) = svc.generate_token("operador").unwrap();
        let tampered = format!("{}x", token);
        assert!(svc.verify_token(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let (token, _) = test_service().generate_token("operador").unwrap();
        let other = JwtService::new(JwtConfig {
            secret: "another-secret-also-32-bytes-long!!!".to_string(),
            expiration_minutes: 60,
            issuer: "manzanos-server".to_string(),
            audience: "manzanos-app".to_string(),
        });
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn extracts_bearer() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
