//! Error types for the Sprout backend

use thiserror::Error;

/// Sprout error taxonomy
#[derive(Error, Debug)]
pub enum Error {
    // Authentication Errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token invalid or expired")]
    RefreshTokenInvalid,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // Authorization Errors
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: insufficient access level")]
    Forbidden,

    // Record Errors
    #[error("Record not found")]
    NotFound,

    #[error("Login already taken")]
    LoginTaken,

    #[error("Student already enrolled in activity")]
    AlreadyEnrolled,

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // General Errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for Sprout operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP status code for each error type
impl Error {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidField(_) | Self::WeakPassword(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::RefreshTokenInvalid
            | Self::Unauthorized => 401,

            // 403 Forbidden
            Self::Forbidden => 403,

            // 404 Not Found
            Self::NotFound => 404,

            // 409 Conflict
            Self::LoginTaken | Self::AlreadyEnrolled => 409,

            // 422 Unprocessable Entity
            Self::ForeignKeyViolation(_) => 422,

            // 500 Internal Server Error
            Self::DatabaseError(_)
            | Self::ConfigError(_)
            | Self::InternalError(_)
            | Self::IoError(_)
            | Self::JsonError(_) => 500,
        }
    }

    /// Error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
            Self::RefreshTokenInvalid => "refresh_token_invalid",
            Self::WeakPassword(_) => "weak_password",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::LoginTaken => "login_taken",
            Self::AlreadyEnrolled => "already_enrolled",
            Self::ForeignKeyViolation(_) => "fk_violation",
            Self::InvalidField(_) => "invalid_field",
            Self::DatabaseError(_) => "database_error",
            Self::ConfigError(_) => "config_error",
            Self::InternalError(_) => "internal_error",
            Self::IoError(_) => "io_error",
            Self::JsonError(_) => "json_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::InvalidCredentials.status_code(), 401);
        assert_eq!(Error::NotFound.status_code(), 404);
        assert_eq!(Error::LoginTaken.status_code(), 409);
        assert_eq!(Error::ForeignKeyViolation("payments".into()).status_code(), 422);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::NotFound.error_code(), "not_found");
        assert_eq!(Error::AlreadyEnrolled.error_code(), "already_enrolled");
    }
}
