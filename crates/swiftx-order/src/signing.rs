//! EIP-712 signing of Permit2 witness transfers.
//!
//! Used by the CLI to sign stored orders locally. The relay itself never holds
//! keys; callers normally sign with their own wallet and publish the result.

use crate::witness::PERMIT_WITNESS_TYPE_STRING;
use crate::OrderError;
use alloy::signers::{local::PrivateKeySigner, Signer};
use alloy::sol_types::{Eip712Domain, SolValue};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use std::borrow::Cow;
use swiftx_types::TransferPayload;
use tracing::debug;

const TOKEN_PERMISSIONS_TYPE: &str = "TokenPermissions(address token,uint256 amount)";

/// Where and for whom a permit is valid.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext {
	pub chain_id: u64,
	pub permit2: Address,
	/// Contract allowed to pull the tokens, the SwiftX contract.
	pub spender: Address,
}

impl SigningContext {
	pub fn domain(&self) -> Eip712Domain {
		Eip712Domain::new(
			Some(Cow::Borrowed("Permit2")),
			None,
			Some(U256::from(self.chain_id)),
			Some(self.permit2),
			None,
		)
	}
}

/// Digest the owner signs for `transfer`.
pub fn permit_digest(transfer: &TransferPayload, ctx: &SigningContext) -> B256 {
	let permitted = &transfer.permit.permitted;
	let token_permissions = keccak256(
		(keccak256(TOKEN_PERMISSIONS_TYPE), permitted.token, permitted.amount).abi_encode(),
	);

	let struct_hash = keccak256(
		(
			keccak256(PERMIT_WITNESS_TYPE_STRING),
			token_permissions,
			ctx.spender,
			transfer.permit.nonce,
			transfer.permit.deadline,
			transfer.witness,
		)
			.abi_encode(),
	);

	let mut preimage = Vec::with_capacity(66);
	preimage.extend_from_slice(&[0x19, 0x01]);
	preimage.extend_from_slice(ctx.domain().separator().as_slice());
	preimage.extend_from_slice(struct_hash.as_slice());
	keccak256(preimage)
}

/// Signs `transfer` in place with a 65-byte `r || s || v` signature.
pub async fn sign_transfer(
	transfer: &mut TransferPayload,
	signer: &PrivateKeySigner,
	ctx: &SigningContext,
) -> Result<(), OrderError> {
	if signer.address() != transfer.owner {
		return Err(OrderError::Signing(format!(
			"signer {} is not the order owner {}",
			signer.address(),
			transfer.owner
		)));
	}

	let digest = permit_digest(transfer, ctx);
	let signature = signer
		.sign_hash(&digest)
		.await
		.map_err(|e| OrderError::Signing(e.to_string()))?;

	debug!(%digest, witness = %transfer.witness, "signed transfer payload");
	transfer.signature = Bytes::from(signature.as_bytes().to_vec());
	Ok(())
}
