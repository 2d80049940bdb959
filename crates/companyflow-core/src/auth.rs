//! Credential collaborators: password hashing and bearer token issuance.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    /// `Ok(false)` for a wrong password; `Err` only for a malformed hash.
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, AppError>;
}

pub trait TokenService: Send + Sync {
    fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, AppError>;

    /// Returns the subject of a valid, unexpired token
    fn validate(&self, token: &str) -> Result<Uuid, AppError>;
}

/// Argon2id with the crate's default parameters
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        use argon2::{
            password_hash::{PasswordHasher as _, SaltString},
            Argon2,
        };
        use rand_core::OsRng;

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, AppError> {
        use argon2::{
            password_hash::{PasswordHash, PasswordVerifier},
            Argon2,
        };

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid hash format: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// HS256 tokens signed with a shared secret
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Secret from `JWT_SECRET`, session lifetime from `JWT_EXPIRY_HOURS`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let secret = config
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::Internal("JWT_SECRET is not configured".to_string()))?;
        Ok(Self::new(secret).with_session_ttl(config.token_ttl()))
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Issue a token with the configured session lifetime
    pub fn issue_session(&self, subject: Uuid) -> Result<String, AppError> {
        self.issue(subject, self.session_ttl)
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
                }
            })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: subject,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<Uuid, AppError> {
        Ok(self.decode_claims(token)?.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-hs256-test-secret-that-is-long-enough";

    #[test]
    fn test_hash_and_verify_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("correct-horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify(&hash, "correct-horse").unwrap());
        assert!(!hasher.verify(&hash, "battery-staple").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2PasswordHasher;
        assert!(matches!(
            hasher.verify("plaintext-in-db", "anything"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let tokens = JwtTokenService::new(SECRET);
        let subject = Uuid::new_v4();
        let token = tokens.issue(subject, Duration::from_secs(3600)).unwrap();
        assert_eq!(tokens.validate(&token).unwrap(), subject);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = JwtTokenService::new(SECRET)
            .issue(Uuid::new_v4(), Duration::from_secs(60))
            .unwrap();
        let other = JwtTokenService::new("a-completely-different-secret-value!!");
        assert!(matches!(other.validate(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_session_lifetime_follows_config() {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/companyflow".to_string()),
            "JWT_SECRET" => Some(SECRET.to_string()),
            "JWT_EXPIRY_HOURS" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();
        let tokens = JwtTokenService::from_config(&config).unwrap();
        assert_eq!(tokens.session_ttl(), Duration::from_secs(2 * 3600));

        let subject = Uuid::new_v4();
        let token = tokens.issue_session(subject).unwrap();
        let claims = tokens.decode_claims(&token).unwrap();
        assert_eq!(claims.sub, subject);
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn test_from_config_requires_secret() {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/companyflow".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(matches!(
            JwtTokenService::from_config(&config),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = JwtTokenService::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding_key).unwrap();
        match tokens.validate(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("expected expiry failure, got {:?}", other.map(|_| ())),
        }
    }
}
