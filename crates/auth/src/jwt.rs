//! JWT session token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, AuthResult, DEFAULT_JWT_ISSUER, DEFAULT_SESSION_HOURS};

/// JWT claims for session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// JWT ID. Doubles as the session ID.
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a user session.
    pub fn new(
        username: impl Into<String>,
        session_id: impl Into<String>,
        issuer: impl Into<String>,
        expiration_hours: u64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer.into(),
            jti: session_id.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> AuthResult<&str> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(&self.sub)
    }

    /// Returns the session ID.
    pub fn session_id(&self) -> &str {
        &self.jti
    }
}

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session lifetime in hours.
    pub expiration_hours: u64,
    /// Token issuer.
    pub issuer: String,
}

impl JwtConfig {
    /// Creates a new JWT configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours: DEFAULT_SESSION_HOURS,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
        }
    }

    /// Sets the expiration time in hours.
    pub fn with_expiration_hours(mut self, hours: u64) -> Self {
        self.expiration_hours = hours;
        self
    }
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Session ID embedded in the token.
    pub session_id: String,
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Creates a new JWT manager.
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Starts a new session for a user and returns its token.
    pub fn generate_token(&self, username: &str) -> AuthResult<IssuedToken> {
        let session_id = Uuid::new_v4().to_string();
        let claims = Claims::new(
            username,
            session_id.clone(),
            self.config.issuer.clone(),
            self.config.expiration_hours,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::JwtEncoding(e.to_string()))?;

        Ok(IssuedToken { token, session_id })
    }

    /// Validates and decodes a token.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Returns the session lifetime in seconds.
    pub fn expiration_seconds(&self) -> u64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generation_and_validation() {
        let config = JwtConfig::new("test-secret-key-must-be-long-enough-for-security");
        let manager = JwtManager::new(config);

        let issued = manager.generate_token("admin").unwrap();
        let claims = manager.validate_token(&issued.token).unwrap();

        assert_eq!(claims.username().unwrap(), "admin");
        assert_eq!(claims.session_id(), issued.session_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_sessions_are_distinct() {
        let manager = JwtManager::new(JwtConfig::new("test-secret-key-must-be-long-enough"));

        let first = manager.generate_token("admin").unwrap();
        let second = manager.generate_token("admin").unwrap();

        assert_ne!(first.session_id, second.session_id);
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::new("test-secret-key-must-be-long-enough-for-security");
        let manager = JwtManager::new(config);

        let result = manager.validate_token("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = JwtManager::new(JwtConfig::new("secret-one-must-be-long-enough"));
        let manager2 = JwtManager::new(JwtConfig::new("secret-two-must-be-long-enough"));

        let issued = manager1.generate_token("admin").unwrap();

        let result = manager2.validate_token(&issued.token);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let secret = "shared-secret-must-be-long-enough";
        let issuer_a = JwtManager::new(JwtConfig {
            issuer: "a".to_string(),
            ..JwtConfig::new(secret)
        });
        let issuer_b = JwtManager::new(JwtConfig {
            issuer: "b".to_string(),
            ..JwtConfig::new(secret)
        });

        let issued = issuer_a.generate_token("admin").unwrap();

        assert!(issuer_b.validate_token(&issued.token).is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let claims = Claims::new("", "session", DEFAULT_JWT_ISSUER, 1);

        assert!(claims.username().is_err());
    }
}
