//! # REST API HTTP Server
//!
//! Axum router for the vehicle query endpoints. The query pipeline is
//! synchronous, so each request runs it on the blocking pool.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderValue,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::service::VehicleService;
use crate::storage::VehicleStore;

use super::errors::{RestError, RestResult};
use super::parser::parse_query;
use super::response::VehicleResponse;

/// Shared state type
type ServiceState<S> = Arc<VehicleService<S>>;

/// REST API server
pub struct RestServer<S: VehicleStore> {
    service: Arc<VehicleService<S>>,
    config: ServerConfig,
}

impl<S: VehicleStore + 'static> RestServer<S> {
    pub fn new(service: VehicleService<S>, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health-check", get(health_check))
            .route("/vehicles", get(vehicles_handler::<S>))
            .with_state(self.service.clone())
            .layer(cors_layer(&self.config.cors_origins))
            .layer(CatchPanicLayer::new())
            .layer(TraceLayer::new_for_http())
    }

    /// Binds the configured address and serves until Ctrl-C
    pub async fn serve(self) -> std::io::Result<()> {
        let addr: SocketAddr = self.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Empty origin list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

async fn health_check() -> &'static str {
    "Ok"
}

async fn vehicles_handler<S: VehicleStore + 'static>(
    State(service): State<ServiceState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<VehicleResponse>>> {
    let query = parse_query(&params)?;

    let vehicles = tokio::task::spawn_blocking(move || service.get_vehicles(&query))
        .await
        .map_err(|e| RestError::Internal(e.to_string()))??;

    Ok(Json(vehicles.into_iter().map(VehicleResponse::from).collect()))
}
