//! HTTP handlers for user management
//!
//! These endpoints manage backend logins and therefore require a bearer
//! token with admin access level; the other entity endpoints do not.

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_auth::guard::{require_level, validate_request, AuthContext};
use sprout_auth::{password, AuthState};
use sprout_common::error::Result;
use sprout_common::types::{NewUser, UserPatch, ACCESS_ADMIN};

use crate::respond::error_response;

fn require_admin(req: &HttpRequest, state: &AuthState) -> Result<AuthContext> {
    let context = validate_request(req, &state.jwt_manager)?;
    require_level(&context, ACCESS_ADMIN)?;
    Ok(context)
}

/// GET /users
pub async fn list(state: web::Data<Arc<AuthState>>, req: HttpRequest) -> HttpResponse {
    if let Err(e) = require_admin(&req, &state) {
        return error_response(e);
    }
    match state.store.list_users() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /users/{id}
pub async fn get(
    state: web::Data<Arc<AuthState>>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(e) = require_admin(&req, &state) {
        return error_response(e);
    }
    match state.store.get_user(path.into_inner()) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// POST /users
pub async fn create(
    state: web::Data<Arc<AuthState>>,
    body: web::Json<NewUser>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(e) = require_admin(&req, &state) {
        return error_response(e);
    }

    let new = body.into_inner();
    if let Err(e) = password::validate(&new.password, &state.password_requirements) {
        return error_response(e);
    }
    let hash = match password::hash(&new.password) {
        Ok(hash) => hash,
        Err(e) => return error_response(e),
    };

    match state.store.create_user(&new, &hash) {
        Ok(user) => {
            info!("Created user {} ({})", user.id, user.login);
            HttpResponse::Created().json(user)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /users/{id}
pub async fn update(
    state: web::Data<Arc<AuthState>>,
    path: web::Path<i64>,
    body: web::Json<UserPatch>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(e) = require_admin(&req, &state) {
        return error_response(e);
    }

    let patch = body.into_inner();
    let new_hash = match &patch.password {
        Some(pass) => {
            if let Err(e) = password::validate(pass, &state.password_requirements) {
                return error_response(e);
            }
            match password::hash(pass) {
                Ok(hash) => Some(hash),
                Err(e) => return error_response(e),
            }
        }
        None => None,
    };

    match state.store.update_user(path.into_inner(), patch, new_hash) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// DELETE /users/{id}
pub async fn delete(
    state: web::Data<Arc<AuthState>>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(e) = require_admin(&req, &state) {
        return error_response(e);
    }
    let id = path.into_inner();
    match state.store.delete_user(id) {
        Ok(()) => {
            info!("Deleted user {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}
