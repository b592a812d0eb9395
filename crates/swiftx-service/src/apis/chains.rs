use super::ApiError;
use crate::server::AppState;
use axum::{
	extract::{Query, State},
	response::Json,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use swiftx_core::EngineError;
use swiftx_types::{IntegratedChains, Token};

#[derive(Debug, Deserialize)]
pub struct ChainQuery {
	chain: Option<String>,
}

impl ChainQuery {
	fn chain(&self) -> Result<&str, ApiError> {
		self.chain
			.as_deref()
			.filter(|c| !c.trim().is_empty())
			.ok_or(ApiError::Engine(EngineError::ChainNotFound))
	}
}

/// `GET /integratedChains`
pub async fn integrated_chains(State(state): State<AppState>) -> Json<IntegratedChains> {
	Json(state.engine.integrated_chains())
}

/// `GET /isIntegratedChain?chain=`
pub async fn is_integrated_chain(
	State(state): State<AppState>,
	Query(query): Query<ChainQuery>,
) -> Result<Json<BTreeMap<String, bool>>, ApiError> {
	Ok(Json(state.engine.is_integrated_chain(query.chain()?)?))
}

/// `GET /gaslessTokens?chain=`
pub async fn gasless_tokens(
	State(state): State<AppState>,
	Query(query): Query<ChainQuery>,
) -> Result<Json<Vec<Token>>, ApiError> {
	Ok(Json(state.engine.gasless_tokens(query.chain()?).await?))
}

/// `GET /gaslessLimitTokens?chain=`
pub async fn gasless_limit_tokens(
	State(state): State<AppState>,
	Query(query): Query<ChainQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
	Ok(Json(state.engine.gasless_limit_tokens(query.chain()?).await?))
}
