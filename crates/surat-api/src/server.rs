//! Router assembly and the HTTP listener.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use surat_auth::{AuthConfig, AuthLayer, TokenValidator};
use surat_core::SuratConfig;
use surat_google::GoogleTokenValidator;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// `/health` is public; every other route sits behind the auth layer.
pub fn router<V: TokenValidator>(state: AppState, validator: Arc<V>) -> Router {
    let auth = auth_config(&state.config);

    let protected = Router::new()
        .route("/session", get(handlers::session))
        .route("/residents", get(handlers::list_residents))
        .route("/residents/{nik}", get(handlers::get_resident))
        .route("/letter-types", get(handlers::list_letter_types))
        .route("/letter-types/{id}/form", get(handlers::letter_form))
        .route("/letters/preview", post(handlers::preview_letter))
        .route("/letters/documents", post(handlers::create_document))
        .route(
            "/letters/documents/{id}",
            axum::routing::delete(handlers::delete_document),
        )
        .route(
            "/letters/documents/{id}/export",
            get(handlers::export_document),
        )
        .layer(AuthLayer::new(validator, auth));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn auth_config(config: &SuratConfig) -> AuthConfig {
    AuthConfig {
        enabled: config.auth.enabled,
        audience: config.auth.audience.clone(),
        domain: config.auth.domain.clone(),
    }
}

/// Surat API server
pub struct Server {
    config: SuratConfig,
}

impl Server {
    pub fn new(config: SuratConfig) -> Self {
        Self { config }
    }

    /// Router wired to the real Google endpoints.
    pub fn app(&self) -> Result<Router> {
        let validator = GoogleTokenValidator::new(&self.config.google)
            .map_err(surat_google::Error::from)?;
        let state = AppState::new(self.config.clone())?;
        Ok(router(state, Arc::new(validator)))
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let app = self.app()?;
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| Error::Bind {
                addr: addr.clone(),
                source,
            })?;

        if !self.config.auth.enabled {
            tracing::warn!("Authentication disabled; bearer tokens are not validated");
        }
        tracing::info!(%addr, "Surat API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Error::Serve)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
