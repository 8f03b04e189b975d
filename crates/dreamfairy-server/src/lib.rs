//! Router assembly and serving for the Dream Fairy function endpoints

mod cors;
mod health;

use std::net::SocketAddr;

use axum::{Extension, Router};
use dreamfairy_auth::{AuthGuard, IdentityClient};
use dreamfairy_config::Config;
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
    /// Returns an error if a feature server or the identity client fails to
    /// initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let functions = Router::new()
            .merge(story::endpoint_router().with_state(story::build_server(config)?))
            .merge(imagegen::endpoint_router().with_state(imagegen::build_server(config)?))
            .merge(stt::endpoint_router().with_state(stt::build_server(config)?))
            .merge(tts::endpoint_router().with_state(tts::build_server(config)?));

        let prefix = config.server.path_prefix.trim_end_matches('/');

        let mut app = if prefix.is_empty() {
            functions
        } else {
            Router::new().nest(prefix, functions)
        };

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        let guard = match config.identity {
            Some(ref identity) => {
                tracing::debug!(url = %identity.url, "bearer tokens resolved by identity service");
                AuthGuard::new(IdentityClient::new(identity)?)
            }
            None => {
                tracing::warn!("no identity service configured, function calls will fail");
                AuthGuard::unconfigured()
            }
        };

        app = app.layer(Extension(guard));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        tracing::debug!(prefix = %config.server.path_prefix, "function routes mounted");

        Ok(Self { router: app, listen_address })
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
