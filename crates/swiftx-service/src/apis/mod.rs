//! Request handlers.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use swiftx_core::EngineError;
use swiftx_types::ErrorResponse;
use tracing::{error, warn};

pub mod chains;
pub mod orders;

/// Message returned when a publish or remove body cannot be used.
pub const INVALID_PAYLOAD: &str = "Invalid payload or missing witness";

/// Handler error, rendered as `{"error": ...}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
	BadRequest(String),
	Engine(EngineError),
}

impl From<EngineError> for ApiError {
	fn from(e: EngineError) -> Self {
		ApiError::Engine(e)
	}
}

impl ApiError {
	fn status_and_message(&self) -> (StatusCode, String) {
		let e = match self {
			ApiError::BadRequest(message) => return (StatusCode::BAD_REQUEST, message.clone()),
			ApiError::Engine(e) => e,
		};

		match e {
			EngineError::Validation(_) | EngineError::ChainNotIntegrated => {
				(StatusCode::BAD_REQUEST, e.to_string())
			}
			EngineError::ChainNotFound | EngineError::NotFound => {
				(StatusCode::NOT_FOUND, e.to_string())
			}
			EngineError::Upstream { stage, message } => {
				error!(stage = %stage, error = %message, "order request failed upstream");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal server error".to_string(),
				)
			}
			EngineError::TokenListing(message) => {
				error!(error = %message, "token listing failed");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"Failed to fetch tokens".to_string(),
				)
			}
			EngineError::Storage(_) | EngineError::Config(_) => {
				error!(error = %e, "request failed");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"Internal server error".to_string(),
				)
			}
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, message) = self.status_and_message();
		if status.is_client_error() {
			warn!(%status, error = %message, "rejected request");
		}
		(status, Json(ErrorResponse::new(message))).into_response()
	}
}
