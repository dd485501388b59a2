//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use sprout_common::error::{Error, Result};
use sprout_common::types::{TokenClaims, User};

const AUDIENCE: &str = "sprout";

/// JWT manager for token generation and validation
pub struct JwtManager {
    secret: Vec<u8>,
    issuer: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    algorithm: Algorithm,
}

impl JwtManager {
    /// Create a new JWT manager with the given configuration
    pub fn new(secret: &str, issuer: &str, access_token_expiry: u64, refresh_token_expiry: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            issuer: issuer.to_string(),
            access_token_expiry: access_token_expiry as i64,
            refresh_token_expiry: refresh_token_expiry as i64,
            algorithm: Algorithm::HS256,
        }
    }

    /// Generate a new JWT secret if none is configured
    pub fn generate_secret() -> String {
        use base64::Engine;
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user: &User, session_id: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = TokenClaims {
            aud: AUDIENCE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            sub: user.id.to_string(),
            login: user.login.clone(),
            access_level: user.access_level.clone(),
            session_id: Some(session_id.to_string()),
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|e| Error::InternalError(format!("Failed to encode JWT: {}", e)))
    }

    /// Generate an opaque refresh token
    pub fn generate_refresh_token(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Validate and decode an access token
    pub fn validate_access_token(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[AUDIENCE]);
        validation.set_issuer(&[&self.issuer]);

        let token_data =
            decode::<TokenClaims>(token, &DecodingKey::from_secret(&self.secret), &validation)
                .map_err(|e| match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => Error::TokenExpired,
                    _ => Error::InvalidToken,
                })?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> u64 {
        self.access_token_expiry as u64
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> u64 {
        self.refresh_token_expiry as u64
    }
}

/// Refresh token state tracked by the session store
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: i64,
    pub session_id: String,
    pub parent: Option<String>,
    pub revoked: bool,
    pub created_at: chrono::DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(user_id: i64, session_id: &str) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            session_id: session_id.to_string(),
            parent: None,
            revoked: false,
            created_at: Utc::now(),
        }
    }

    /// Create a rotated successor of this token
    pub fn rotate(&self) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            session_id: self.session_id.clone(),
            parent: Some(self.token.clone()),
            revoked: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_common::types::ACCESS_STAFF;

    fn test_user() -> User {
        User {
            id: 7,
            login: "ana".into(),
            access_level: ACCESS_STAFF.into(),
            teacher_id: None,
        }
    }

    fn manager() -> JwtManager {
        JwtManager::new("test-secret-key", "http://localhost", 3600, 604_800)
    }

    #[test]
    fn test_token_round_trip() {
        let manager = manager();
        let user = test_user();
        let session_id = Uuid::new_v4().to_string();

        let token = manager.generate_access_token(&user, &session_id).unwrap();
        let claims = manager.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.login, "ana");
        assert_eq!(claims.access_level, ACCESS_STAFF);
        assert_eq!(claims.session_id, Some(session_id));
    }

    #[test]
    fn test_invalid_token() {
        let result = manager().validate_access_token("invalid.token.here");
        assert!(matches!(result, Err(Error::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = manager()
            .generate_access_token(&test_user(), "session-1")
            .unwrap();
        let other = JwtManager::new("other-secret", "http://localhost", 3600, 604_800);
        assert!(other.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_rotation() {
        let original = RefreshToken::new(7, "session-1");
        let rotated = original.rotate();

        assert_ne!(original.token, rotated.token);
        assert_eq!(rotated.parent, Some(original.token));
        assert_eq!(original.user_id, rotated.user_id);
    }
}
