//! Configuration types for the Sprout server

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from a TOML file by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SproutConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for SproutConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Host to bind to
    pub host: String,
    /// Port for the HTTP API (default: 8080)
    pub port: u16,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./sprout.db".to_string(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT secret for HS256 (auto-generated if not set)
    pub jwt_secret: Option<String>,
    /// Access token expiration in seconds (default: 3600)
    pub jwt_expiry: u64,
    /// Refresh token expiration in seconds (default: 604800 = 7 days)
    pub refresh_token_expiry: u64,
    /// Token issuer
    pub issuer: String,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiry: 3600,
            refresh_token_expiry: 604_800,
            issuer: "http://localhost:8080".to_string(),
            password_requirements: PasswordRequirements::default(),
        }
    }
}

/// Password requirements configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_numbers: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: false,
            require_numbers: false,
        }
    }
}
