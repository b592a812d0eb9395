use super::{ApiError, INVALID_PAYLOAD};
use crate::server::AppState;
use alloy_primitives::B256;
use axum::{
	extract::{rejection::JsonRejection, Path, Query, State},
	response::Json,
};
use std::collections::HashMap;
use swiftx_types::{PartiallyBuiltOrder, RemoveOrderRequest, SuccessResponse};
use tracing::debug;

/// `GET /instantOrder`
pub async fn instant_order(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PartiallyBuiltOrder>, ApiError> {
	let order = state.engine.create_instant_order(&params).await?;
	Ok(Json(order))
}

/// `GET /conditionalOrder`
pub async fn conditional_order(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PartiallyBuiltOrder>, ApiError> {
	let order = state.engine.create_conditional_order(&params).await?;
	Ok(Json(order))
}

/// `POST /publishOrder`
pub async fn publish_order(
	State(state): State<AppState>,
	body: Result<Json<PartiallyBuiltOrder>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
	let Json(order) = body.map_err(|e| {
		debug!(error = %e, "unusable publish body");
		ApiError::BadRequest(INVALID_PAYLOAD.to_string())
	})?;

	state.engine.publish_order(&order).await?;
	Ok(Json(SuccessResponse::ok()))
}

/// `POST /removeOrder`
pub async fn remove_order(
	State(state): State<AppState>,
	body: Result<Json<RemoveOrderRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
	let witness = body
		.ok()
		.and_then(|Json(request)| request.transfer_payload.witness)
		.ok_or_else(|| ApiError::BadRequest(INVALID_PAYLOAD.to_string()))?;

	state.engine.remove_order(&witness).await?;
	Ok(Json(SuccessResponse::ok()))
}

/// `GET /orders`
pub async fn list_orders(
	State(state): State<AppState>,
) -> Result<Json<Vec<PartiallyBuiltOrder>>, ApiError> {
	Ok(Json(state.engine.get_orders().await?))
}

/// `GET /orders/{witness}`
pub async fn get_order(
	State(state): State<AppState>,
	Path(witness): Path<String>,
) -> Result<Json<PartiallyBuiltOrder>, ApiError> {
	let witness: B256 = witness
		.parse()
		.map_err(|_| ApiError::BadRequest(format!("Invalid witness: {}", witness)))?;
	Ok(Json(state.engine.get_order(&witness).await?))
}
