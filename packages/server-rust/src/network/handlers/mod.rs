//! HTTP and WebSocket handler definitions for the Scribe server.
//!
//! Defines `AppState` (the shared state carried through axum extractors),
//! the domain-error → response mapping, and re-exports all handler
//! functions for convenient access when building the router.

pub mod authors;
pub mod health;
pub mod messages;
pub mod websocket;

pub use authors::{count_authors_handler, list_author_messages_handler, list_authors_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use messages::{
    count_messages_handler, create_message_handler, get_message_handler, update_message_handler,
};
pub use websocket::ws_upgrade_handler;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scribe_core::messages::{ErrorBody, ErrorDetail};

use crate::storage::{MessageHub, RecordStore, StoreError};

use super::{ConnectionRegistry, NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State`
/// extraction.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The record store owning all domain tables.
    pub store: Arc<dyn RecordStore>,
    /// Broadcast hub for message-creation events.
    pub hub: MessageHub,
    /// Registry of live push-channel subscriber connections.
    pub registry: Arc<ConnectionRegistry>,
    /// Graceful shutdown controller with health state and task tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration.
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

/// Response mapping for [`StoreError`].
///
/// Every domain error is a deterministic "does not exist" condition, so
/// all variants render as 404 with a structured body the client can
/// branch on.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                kind: self.0.kind().to_string(),
                key: self.0.key().to_string(),
                message: self.0.to_string(),
            },
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}
