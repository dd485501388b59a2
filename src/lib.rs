//! Sprout - administrative backend for small daycares and preschools
//!
//! Wires the pieces together into one HTTP service:
//!
//! - **JSON REST API** - CRUD endpoints per entity (`/teachers`, `/classes`,
//!   `/students`, `/payments`, `/attendance`, `/activities`, `/users`)
//! - **Authentication** - JWT login for backend users (`/auth/*`)
//! - **Admin pages** - server-rendered HTML forms (`/admin/*`)
//! - **Storage** - embedded SQLite store

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub use sprout_auth as auth;
pub use sprout_common as common;
pub use sprout_rest as rest;
pub use sprout_store as store;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;

use sprout_auth::AuthState;
use sprout_common::config::SproutConfig;
use sprout_common::error::Result;
use sprout_store::SproutStore;

/// Main Sprout server
pub struct SproutServer {
    config: SproutConfig,
    store: Arc<SproutStore>,
    auth_state: Arc<AuthState>,
}

impl SproutServer {
    /// Create a new server with the given configuration
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened.
    pub fn new(config: SproutConfig) -> Result<Self> {
        info!("Initializing Sprout backend");

        let store = Arc::new(SproutStore::open(&config.database.path)?);
        let auth_state = Arc::new(AuthState::new(&config.auth, store.clone()));

        Ok(Self {
            config,
            store,
            auth_state,
        })
    }

    /// Get the store
    #[must_use]
    pub fn store(&self) -> &Arc<SproutStore> {
        &self.store
    }

    /// Get the auth state
    #[must_use]
    pub fn auth_state(&self) -> &Arc<AuthState> {
        &self.auth_state
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &SproutConfig {
        &self.config
    }

    /// Run the HTTP server until it is stopped
    ///
    /// # Errors
    /// Returns an error if binding or serving fails.
    pub async fn run(&self) -> Result<()> {
        let store = self.store.clone();
        let auth_state = self.auth_state.clone();
        let cors_origins = self.config.http.cors_origins.clone();
        let host = self.config.http.host.clone();
        let port = self.config.http.port;

        info!("Starting HTTP server on {}:{}", host, port);
        info!("  - REST API at /");
        info!("  - Admin pages at /admin");

        HttpServer::new(move || {
            let cors = if cors_origins.iter().any(|o| o == "*") {
                Cors::permissive()
            } else {
                cors_origins
                    .iter()
                    .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            };

            App::new()
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(auth_state.clone()))
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .configure(sprout_auth::configure)
                .configure(sprout_web::configure)
                .configure(sprout_rest::configure)
        })
        .workers(4)
        .bind(format!("{}:{}", host, port))?
        .run()
        .await?;

        Ok(())
    }

    /// Shut down gracefully
    ///
    /// # Errors
    /// Currently infallible; kept for symmetry with `run`.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Sprout backend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SproutConfig::default();
        config.database.path = dir
            .path()
            .join("sprout.db")
            .to_string_lossy()
            .into_owned();

        let server = SproutServer::new(config).unwrap();
        assert!(server.store().list_teachers().unwrap().is_empty());
    }
}
