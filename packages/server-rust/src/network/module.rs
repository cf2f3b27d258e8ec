//! Network module with deferred startup lifecycle.
//!
//! `new()` creates resources, `start()` binds the TCP listener, and
//! `serve()` accepts connections until shutdown. The separation lets the
//! binary wire shared state (store, hub) and log the bound address between
//! `start()` and `serve()`.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::storage::{MessageHub, RecordStore};

use super::config::NetworkConfig;
use super::connection::ConnectionRegistry;
use super::handlers::{
    count_authors_handler, count_messages_handler, create_message_handler, get_message_handler,
    health_handler, list_author_messages_handler, list_authors_handler, liveness_handler,
    readiness_handler, update_message_handler, ws_upgrade_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;

/// How long `serve()` waits for live subscriber tasks after shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Manages the full HTTP/WebSocket server lifecycle.
///
/// Follows the deferred startup pattern:
/// 1. `new()` -- allocates shared state (registry, shutdown controller)
/// 2. `start()` -- binds the TCP listener to the configured address
/// 3. `serve()` -- accepts connections until the shutdown future completes
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    store: Arc<dyn RecordStore>,
    hub: MessageHub,
    registry: Arc<ConnectionRegistry>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, store: Arc<dyn RecordStore>, hub: MessageHub) -> Self {
        Self {
            config,
            listener: None,
            store,
            hub,
            registry: Arc::new(ConnectionRegistry::new()),
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Returns a shared reference to the subscriber connection registry.
    #[must_use]
    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /health`, `GET /health/live`, `GET /health/ready` -- probes
    /// - `POST /messages` -- create a message
    /// - `GET /messages/count` -- message table cardinality
    /// - `GET /messages/{id}`, `PATCH /messages/{id}` -- lookup and update
    /// - `GET /authors`, `GET /authors/count` -- author listing and count
    /// - `GET /authors/{name}/messages` -- an author's messages
    /// - `GET /ws` -- push-channel WebSocket upgrade
    #[must_use]
    pub fn build_router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
            hub: self.hub.clone(),
            registry: Arc::clone(&self.registry),
            shutdown: Arc::clone(&self.shutdown),
            config: Arc::new(self.config.clone()),
            start_time: Instant::now(),
        };

        let layers = build_http_layers(&self.config);

        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .route("/messages", post(create_message_handler))
            .route("/messages/count", get(count_messages_handler))
            .route(
                "/messages/{id}",
                get(get_message_handler).patch(update_message_handler),
            )
            .route("/authors", get(list_authors_handler))
            .route("/authors/count", get(count_authors_handler))
            .route("/authors/{name}/messages", get(list_author_messages_handler))
            .route("/ws", get(ws_upgrade_handler))
            .layer(layers)
            .with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// one when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until the shutdown future completes.
    ///
    /// After the shutdown future resolves:
    /// 1. The listener stops accepting and in-flight HTTP requests finish
    /// 2. Health state transitions to Draining and subscriber loops are
    ///    signalled to close their sockets
    /// 3. Waits up to [`DRAIN_TIMEOUT`] for subscriber tasks to finish
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .expect("start() must be called before serve()");

        // Transition to Ready so readiness probes pass.
        self.shutdown.set_ready();
        info!("Serving HTTP/WS connections");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        // Upgraded WebSocket tasks outlive the accept loop; signal them
        // and wait for their in-flight guards to drop.
        self.shutdown.trigger_shutdown();

        let subscribers = self.registry.count();
        if subscribers > 0 {
            info!("Draining {} subscriber connections", subscribers);
        }

        if self.shutdown.wait_for_drain(DRAIN_TIMEOUT).await {
            info!("Drain complete");
        } else {
            warn!(
                "Drain timed out with {} tasks still live",
                self.shutdown.in_flight_count()
            );
        }

        Ok(())
    }
}
