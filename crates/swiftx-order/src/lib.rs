//! SwiftX order construction.
//!
//! The pipeline is pure: a parsed [`OrderRequest`], a quote, the owner's
//! Permit2 nonce and a block timestamp go in, and a
//! [`PartiallyBuiltOrder`](swiftx_types::PartiallyBuiltOrder) whose transfer
//! payload carries the EIP-712 witness comes out. Network reads happen in the
//! engine, never here.

use swiftx_types::AddressError;
use thiserror::Error;

pub mod builder;
pub mod request;
pub mod signing;
pub mod transfer;
pub mod witness;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{BuilderSettings, OrderBuilder, OrderInputs};
pub use request::{ConditionalParams, OrderKind, OrderRequest};
pub use signing::{permit_digest, sign_transfer, SigningContext};
pub use transfer::build_transfer_payload;
pub use witness::{compute_witness, PERMIT_WITNESS_TYPE_STRING, WITNESS_TYPE_STRING};

#[derive(Debug, Error)]
pub enum OrderError {
	/// A required request parameter is absent or empty.
	#[error("Missing required parameter: {0}")]
	MissingParameter(&'static str),
	#[error("Invalid parameter {name}: {reason}")]
	InvalidParameter { name: &'static str, reason: String },
	/// The quote carried data that cannot be encoded into an order.
	#[error("Invalid quote: {0}")]
	InvalidQuote(String),
	#[error("Signing failed: {0}")]
	Signing(String),
}

impl OrderError {
	pub(crate) fn invalid(name: &'static str, reason: impl ToString) -> Self {
		OrderError::InvalidParameter {
			name,
			reason: reason.to_string(),
		}
	}

	/// True for errors caused by the caller's input.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			OrderError::MissingParameter(_) | OrderError::InvalidParameter { .. }
		)
	}
}

impl From<AddressError> for OrderError {
	fn from(e: AddressError) -> Self {
		OrderError::InvalidQuote(e.to_string())
	}
}
