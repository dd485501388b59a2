//! Request guards for protected routes

use actix_web::HttpRequest;

use sprout_common::error::{Error, Result};
use sprout_common::types::{TokenClaims, ACCESS_ADMIN};

use crate::jwt::JwtManager;

/// Authenticated user context extracted from a bearer token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub login: String,
    pub access_level: String,
    pub session_id: Option<String>,
}

impl TryFrom<TokenClaims> for AuthContext {
    type Error = Error;

    fn try_from(claims: TokenClaims) -> Result<Self> {
        let user_id = claims.sub.parse().map_err(|_| Error::InvalidToken)?;
        Ok(Self {
            user_id,
            login: claims.login,
            access_level: claims.access_level,
            session_id: claims.session_id,
        })
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Validate the request's bearer token and build an auth context
pub fn validate_request(req: &HttpRequest, jwt_manager: &JwtManager) -> Result<AuthContext> {
    let token = extract_bearer_token(req).ok_or(Error::Unauthorized)?;
    let claims = jwt_manager.validate_access_token(&token)?;
    AuthContext::try_from(claims)
}

/// Check that the context carries the required access level.
/// Admins pass every check.
pub fn require_level(context: &AuthContext, required: &str) -> Result<()> {
    if context.access_level == required || context.access_level == ACCESS_ADMIN {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_common::types::ACCESS_STAFF;

    fn context(level: &str) -> AuthContext {
        AuthContext {
            user_id: 7,
            login: "ana".into(),
            access_level: level.into(),
            session_id: None,
        }
    }

    #[test]
    fn test_context_from_claims() {
        let claims = TokenClaims {
            aud: "sprout".into(),
            exp: 0,
            iat: 0,
            iss: "test".into(),
            sub: "7".into(),
            login: "ana".into(),
            access_level: ACCESS_STAFF.into(),
            session_id: Some("session-1".into()),
        };
        let context = AuthContext::try_from(claims).unwrap();
        assert_eq!(context.user_id, 7);
        assert_eq!(context.login, "ana");
    }

    #[test]
    fn test_bad_subject_rejected() {
        let claims = TokenClaims {
            aud: "sprout".into(),
            exp: 0,
            iat: 0,
            iss: "test".into(),
            sub: "not-a-number".into(),
            login: "ana".into(),
            access_level: ACCESS_STAFF.into(),
            session_id: None,
        };
        assert!(matches!(
            AuthContext::try_from(claims),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_require_level() {
        assert!(require_level(&context(ACCESS_STAFF), ACCESS_STAFF).is_ok());
        assert!(require_level(&context(ACCESS_STAFF), ACCESS_ADMIN).is_err());
    }

    #[test]
    fn test_admin_passes_any_check() {
        assert!(require_level(&context(ACCESS_ADMIN), ACCESS_STAFF).is_ok());
        assert!(require_level(&context(ACCESS_ADMIN), ACCESS_ADMIN).is_ok());
    }
}
