#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod config_api;
mod cors;
mod health;
mod static_assets;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use escriba_config::{Config, CredentialStore};
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if subsystem initialization fails
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001)));

        // Both proxies resolve credentials against the same store
        let store = Arc::new(CredentialStore::new(&config.credentials.store_path));

        let transcription_state = transcription::build_server(&config, Arc::clone(&store))?;
        let completion_state = completion::build_server(&config, Arc::clone(&store))?;

        // Build base router with feature routes
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Credential configuration API
        app = app.merge(config_api::endpoint_router().with_state(store));

        // Transcription routes
        app = app.merge(transcription::endpoint_router().with_state(transcription_state));

        // Template completion routes
        app = app.merge(completion::endpoint_router().with_state(completion_state));

        // Frontend assets; everything the API routes don't claim
        if let Some(ref assets_config) = config.static_assets {
            app = app.fallback_service(static_assets::asset_service(assets_config));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
