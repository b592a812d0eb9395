//! Order relay engine.
//!
//! [`SwiftEngine`] ties the order pipeline to its collaborators: chain
//! clients for nonces and block timestamps, the quote service, the price
//! feed, and the order store. [`EngineBuilder`] wires them from a loaded
//! [`Config`](swiftx_config::Config).

use swiftx_order::OrderError;
use swiftx_storage::StorageError;
use thiserror::Error;

mod builder;
mod engine;


pub use builder::EngineBuilder;
pub use engine::SwiftEngine;

#[derive(Debug, Error)]
pub enum EngineError {
	/// Malformed or missing caller input.
	#[error("{0}")]
	Validation(String),
	#[error("Source chain is not integrated")]
	ChainNotIntegrated,
	#[error("Chain not found")]
	ChainNotFound,
	/// A collaborator failed while building an order.
	#[error("{stage} failed: {message}")]
	Upstream { stage: &'static str, message: String },
	#[error("Failed to fetch tokens: {0}")]
	TokenListing(String),
	#[error("Order not found")]
	NotFound,
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
	#[error("Configuration error: {0}")]
	Config(String),
}

impl EngineError {
	pub(crate) fn upstream(stage: &'static str, err: impl ToString) -> Self {
		EngineError::Upstream {
			stage,
			message: err.to_string(),
		}
	}
}

impl From<OrderError> for EngineError {
	fn from(e: OrderError) -> Self {
		if e.is_validation() {
			EngineError::Validation(e.to_string())
		} else {
			EngineError::upstream("order build", e)
		}
	}
}
