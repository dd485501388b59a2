//! Response helpers shared by the entity handlers

use actix_web::HttpResponse;
use tracing::error;

use sprout_common::error::Error;
use sprout_common::types::ApiError;

/// Convert a Sprout error into the matching HTTP response
pub fn error_response(error: Error) -> HttpResponse {
    let status = error.status_code();
    if status == 500 {
        error!("Request failed: {}", error);
    }
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

    #[test]
    fn test_status_mapping() {
        assert_eq!(error_response(Error::NotFound).status(), 404);
        assert_eq!(error_response(Error::LoginTaken).status(), 409);
        assert_eq!(
            error_response(Error::ForeignKeyViolation("x".into())).status(),
            422
        );
        assert_eq!(
            error_response(Error::DatabaseError("x".into())).status(),
            500
        );
    }
}
