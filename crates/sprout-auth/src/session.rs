//! Session management
//!
//! Sessions and refresh tokens are held in memory; a restart signs everyone
//! out. Refresh tokens rotate on use and the replaced token is revoked.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use sprout_common::error::{Error, Result};
use sprout_common::types::{Session, User};

use crate::jwt::{JwtManager, RefreshToken};

/// Session store for managing user sessions
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
    refresh_tokens: RwLock<HashMap<String, RefreshToken>>,
    jwt_manager: Arc<JwtManager>,
}

/// Internal session data
#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub last_refreshed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl SessionStore {
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            refresh_tokens: RwLock::new(HashMap::new()),
            jwt_manager,
        }
    }

    /// Create a new session for a user
    pub fn create_session(
        &self,
        user: &User,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<Session> {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let access_token = self.jwt_manager.generate_access_token(user, &session_id)?;
        let refresh_token = RefreshToken::new(user.id, &session_id);
        let expires_at = now + Duration::seconds(self.jwt_manager.access_token_expiry() as i64);

        self.sessions.write().insert(
            session_id.clone(),
            SessionData {
                session_id,
                user_id: user.id,
                created_at: now,
                last_refreshed_at: now,
                expires_at,
                user_agent,
                ip_address,
            },
        );
        self.refresh_tokens
            .write()
            .insert(refresh_token.token.clone(), refresh_token.clone());

        Ok(Session {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_manager.access_token_expiry(),
            expires_at: expires_at.timestamp() as u64,
            refresh_token: refresh_token.token,
            user: user.clone(),
        })
    }

    /// Owner of a refresh token, if it is still valid
    pub fn refresh_token_owner(&self, refresh_token: &str) -> Result<i64> {
        let tokens = self.refresh_tokens.read();
        let token = tokens.get(refresh_token).ok_or(Error::RefreshTokenInvalid)?;
        if token.revoked || self.is_expired(token) {
            return Err(Error::RefreshTokenInvalid);
        }
        Ok(token.user_id)
    }

    /// Refresh a session: rotate the refresh token and issue a new access
    /// token. The spent token is revoked.
    pub fn refresh_session(&self, refresh_token_str: &str, user: &User) -> Result<Session> {
        let rotated = {
            let mut tokens = self.refresh_tokens.write();
            let token = tokens
                .get_mut(refresh_token_str)
                .ok_or(Error::RefreshTokenInvalid)?;

            if token.revoked || token.user_id != user.id {
                return Err(Error::RefreshTokenInvalid);
            }
            token.revoked = true;

            let rotated = token.rotate();
            let session_id = token.session_id.clone();
            tokens.insert(rotated.token.clone(), rotated.clone());
            drop(tokens);

            let now = Utc::now();
            let expires_at =
                now + Duration::seconds(self.jwt_manager.access_token_expiry() as i64);
            let mut sessions = self.sessions.write();
            if let Some(session) = sessions.get_mut(&session_id) {
                session.last_refreshed_at = now;
                session.expires_at = expires_at;
            }

            rotated
        };

        let access_token = self
            .jwt_manager
            .generate_access_token(user, &rotated.session_id)?;
        let expires_at = Utc::now() + Duration::seconds(self.jwt_manager.access_token_expiry() as i64);

        Ok(Session {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_manager.access_token_expiry(),
            expires_at: expires_at.timestamp() as u64,
            refresh_token: rotated.token,
            user: user.clone(),
        })
    }

    /// Revoke a session and all refresh tokens attached to it
    pub fn revoke_session(&self, session_id: &str) -> Result<()> {
        let removed = self.sessions.write().remove(session_id);
        if removed.is_none() {
            return Err(Error::NotFound);
        }
        let mut tokens = self.refresh_tokens.write();
        for token in tokens.values_mut() {
            if token.session_id == session_id {
                token.revoked = true;
            }
        }
        Ok(())
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    fn is_expired(&self, token: &RefreshToken) -> bool {
        let age = Utc::now() - token.created_at;
        age > Duration::seconds(self.jwt_manager.refresh_token_expiry() as i64)
    }
}
