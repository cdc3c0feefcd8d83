//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, http::HeaderName, routing::get};
use thiserror::Error;
use tower::ServiceBuilder;

use inkpost_auth::Authenticator;
use inkpost_infra::{AppConfig, BlogStore, BlogStoreError, SqliteBlogStore};

use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;

pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8000";

/// Services shared by all handlers; owned here and injected per request.
#[derive(Clone)]
pub struct AppServices {
    pub blogs: Arc<dyn BlogStore>,
    pub auth_header: HeaderName,
    pub cors_origin: String,
}

impl AppServices {
    pub fn new(blogs: Arc<dyn BlogStore>, auth_header: HeaderName) -> Self {
        Self {
            blogs,
            auth_header,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid auth header name '{0}'")]
    AuthHeader(String),

    #[error("failed to open blog store: {0}")]
    Store(#[from] BlogStoreError),
}

/// Build the full HTTP router from explicit parts.
pub fn build_app(services: AppServices, authenticator: Authenticator) -> Router {
    let auth_state = AuthState {
        authenticator,
        header: services.auth_header.clone(),
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(auth_state))
        .layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}

/// Build the router from loaded configuration (public entrypoint used by `main.rs`).
pub async fn build_from_config(config: &AppConfig) -> Result<Router, BuildError> {
    let auth_header = HeaderName::from_bytes(config.auth_header.as_bytes())
        .map_err(|_| BuildError::AuthHeader(config.auth_header.clone()))?;

    let authenticator = Authenticator::resolve(&config.api_auth, config.mechanism_settings());
    tracing::info!(mechanism = authenticator.mechanism(), "api authentication configured");

    if let Some(web) = &config.web_auth {
        tracing::info!(
            mechanism = web.kind(),
            "web authentication descriptor accepted (no web routes served)"
        );
    }

    let store = SqliteBlogStore::connect(&config.database_url).await?;
    let services = AppServices::new(Arc::new(store), auth_header);

    Ok(build_app(services, authenticator))
}
