use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use prometheus::{Encoder, TextEncoder};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

use crate::messaging::ConnectorConfig;
use crate::metrics::Metrics;

pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub connector: ConnectorConfig,
    pub queue_name: String,
    pub metrics: Arc<Metrics>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(users::write_user).get(users::read_users))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

pub async fn start_server(
    state: AppState,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry.gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
    }

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        buffer,
    )
}
