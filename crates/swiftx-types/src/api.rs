//! Request and response bodies of the HTTP API.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
	pub success: bool,
}

impl SuccessResponse {
	pub fn ok() -> Self {
		Self { success: true }
	}
}

/// Body of `POST /removeOrder`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOrderRequest {
	pub transfer_payload: WitnessRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WitnessRef {
	pub witness: Option<B256>,
}
