//! HTTP server for the relay API.

use crate::apis::{chains, orders};
use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};
use std::sync::Arc;
use swiftx_config::ServiceConfig;
use swiftx_core::SwiftEngine;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<SwiftEngine>,
}

pub fn router(engine: Arc<SwiftEngine>) -> Router {
	Router::new()
		.route("/health", get(health_check))
		// Order construction
		.route("/instantOrder", get(orders::instant_order))
		.route("/conditionalOrder", get(orders::conditional_order))
		// Order book
		.route("/publishOrder", post(orders::publish_order))
		.route("/removeOrder", post(orders::remove_order))
		.route("/orders", get(orders::list_orders))
		.route("/orders/{witness}", get(orders::get_order))
		// Chains and tokens
		.route("/integratedChains", get(chains::integrated_chains))
		.route("/isIntegratedChain", get(chains::is_integrated_chain))
		.route("/gaslessTokens", get(chains::gasless_tokens))
		.route("/gaslessLimitTokens", get(chains::gasless_limit_tokens))
		.with_state(AppState { engine })
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Serves the API until `shutdown` resolves.
pub async fn start_server<F>(
	config: &ServiceConfig,
	engine: Arc<SwiftEngine>,
	shutdown: F,
) -> std::io::Result<()>
where
	F: std::future::Future<Output = ()> + Send + 'static,
{
	let bind_address = format!("{}:{}", config.host, config.port);
	let listener = tokio::net::TcpListener::bind(&bind_address).await?;
	info!("{} listening on {}", config.name, bind_address);

	axum::serve(listener, router(engine))
		.with_graceful_shutdown(shutdown)
		.await
}

async fn health_check() -> StatusCode {
	StatusCode::OK
}
