//! HTTP handlers for authentication endpoints

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use sprout_common::config::{AuthConfig, PasswordRequirements};
use sprout_common::error::Error;
use sprout_common::types::ApiError;
use sprout_store::SproutStore;

use crate::guard::{extract_bearer_token, validate_request};
use crate::jwt::JwtManager;
use crate::password;
use crate::session::SessionStore;

/// Shared auth state
pub struct AuthState {
    pub store: Arc<SproutStore>,
    pub sessions: Arc<SessionStore>,
    pub jwt_manager: Arc<JwtManager>,
    pub password_requirements: PasswordRequirements,
}

impl AuthState {
    /// Build the auth state from configuration. Generates a throwaway JWT
    /// secret when none is configured (sessions then die with the process).
    pub fn new(config: &AuthConfig, store: Arc<SproutStore>) -> Self {
        let secret = config.jwt_secret.clone().unwrap_or_else(|| {
            warn!("No JWT secret configured; generating an ephemeral one");
            JwtManager::generate_secret()
        });
        let jwt_manager = Arc::new(JwtManager::new(
            &secret,
            &config.issuer,
            config.jwt_expiry,
            config.refresh_token_expiry,
        ));
        let sessions = Arc::new(SessionStore::new(jwt_manager.clone()));

        Self {
            store,
            sessions,
            jwt_manager,
            password_requirements: config.password_requirements.clone(),
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
pub async fn login(
    state: web::Data<Arc<AuthState>>,
    request: web::Json<LoginRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    let stored = match state.store.find_user_by_login(&request.login) {
        Ok(stored) => stored,
        Err(_) => {
            warn!("Login failed for {}", request.login);
            return error_response(Error::InvalidCredentials);
        }
    };

    if let Err(e) = password::verify(&request.password, &stored.password_hash) {
        warn!("Login failed for {}", request.login);
        return error_response(e);
    }

    info!("User logged in: {}", stored.user.login);

    let user_agent = http_req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let ip_address = http_req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    match state
        .sessions
        .create_session(&stored.user, user_agent, ip_address)
    {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => error_response(e),
    }
}

/// POST /auth/refresh
pub async fn refresh(
    state: web::Data<Arc<AuthState>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    let user_id = match state.sessions.refresh_token_owner(&request.refresh_token) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    let user = match state.store.get_user(user_id) {
        Ok(user) => user,
        // The user was deleted since the token was issued
        Err(_) => return error_response(Error::RefreshTokenInvalid),
    };

    match state.sessions.refresh_session(&request.refresh_token, &user) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => error_response(e),
    }
}

/// POST /auth/logout
pub async fn logout(state: web::Data<Arc<AuthState>>, http_req: HttpRequest) -> HttpResponse {
    let token = match extract_bearer_token(&http_req) {
        Some(t) => t,
        None => return error_response(Error::Unauthorized),
    };

    let claims = match state.jwt_manager.validate_access_token(&token) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    if let Some(session_id) = claims.session_id {
        let _ = state.sessions.revoke_session(&session_id);
    }

    HttpResponse::NoContent().finish()
}

/// GET /auth/me
pub async fn me(state: web::Data<Arc<AuthState>>, http_req: HttpRequest) -> HttpResponse {
    let context = match validate_request(&http_req, &state.jwt_manager) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    match state.store.get_user(context.user_id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// Register the auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) fn error_response(error: Error) -> HttpResponse {
    let status = error.status_code();
    let api_error = ApiError::new(error.error_code(), error.to_string());

    match status {
        400 => HttpResponse::BadRequest().json(api_error),
        401 => HttpResponse::Unauthorized().json(api_error),
        403 => HttpResponse::Forbidden().json(api_error),
        404 => HttpResponse::NotFound().json(api_error),
        409 => HttpResponse::Conflict().json(api_error),
        422 => HttpResponse::UnprocessableEntity().json(api_error),
        _ => HttpResponse::InternalServerError().json(api_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use sprout_common::types::NewUser;

    fn state_with_user(login_name: &str, pass: &str) -> web::Data<Arc<AuthState>> {
        let store = Arc::new(SproutStore::open_in_memory().unwrap());
        let hash = password::hash(pass).unwrap();
        store
            .create_user(
                &NewUser {
                    login: login_name.into(),
                    password: pass.into(),
                    access_level: None,
                    teacher_id: None,
                },
                &hash,
            )
            .unwrap();
        web::Data::new(Arc::new(AuthState::new(&AuthConfig::default(), store)))
    }

    #[tokio::test]
    async fn test_login_success() {
        let state = state_with_user("ana", "password123");
        let req = TestRequest::default().to_http_request();
        let resp = login(
            state,
            web::Json(LoginRequest {
                login: "ana".into(),
                password: "password123".into(),
            }),
            req,
        )
        .await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = state_with_user("ana", "password123");
        let req = TestRequest::default().to_http_request();
        let resp = login(
            state,
            web::Json(LoginRequest {
                login: "ana".into(),
                password: "nope".into(),
            }),
            req,
        )
        .await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_401_not_404() {
        let state = state_with_user("ana", "password123");
        let req = TestRequest::default().to_http_request();
        let resp = login(
            state,
            web::Json(LoginRequest {
                login: "ghost".into(),
                password: "password123".into(),
            }),
            req,
        )
        .await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_refresh_with_bad_token() {
        let state = state_with_user("ana", "password123");
        let resp = refresh(
            state,
            web::Json(RefreshTokenRequest {
                refresh_token: "missing".into(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let state = state_with_user("ana", "password123");
        let req = TestRequest::default().to_http_request();
        let resp = me(state, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_me_with_valid_token() {
        let state = state_with_user("ana", "password123");
        let stored = state.store.find_user_by_login("ana").unwrap();
        let session = state
            .sessions
            .create_session(&stored.user, None, None)
            .unwrap();

        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", session.access_token)))
            .to_http_request();
        let resp = me(state, req).await;
        assert_eq!(resp.status(), 200);
    }
}
