//! Chain-agnostic 32-byte addresses.
//!
//! SwiftX orders carry destination-side addresses as `bytes32` so that a
//! single order layout can target EVM chains and Solana alike. EVM addresses
//! are left-padded with zeros; Solana public keys are already 32 bytes and
//! are written in base58.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
	#[error("invalid hex address {0:?}")]
	InvalidHex(String),
	#[error("invalid base58 address {0:?}")]
	InvalidBase58(String),
	#[error("hex address must be 20 or 32 bytes, got {0}")]
	InvalidHexLength(usize),
	#[error("solana address must be 32 bytes, got {0}")]
	InvalidSolanaLength(usize),
}

/// Address encoding family of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Evm,
	Solana,
}

impl Platform {
	pub fn for_chain(chain: &str) -> Self {
		if chain.eq_ignore_ascii_case("solana") {
			Platform::Solana
		} else {
			Platform::Evm
		}
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Platform::Evm => write!(f, "evm"),
			Platform::Solana => write!(f, "solana"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniversalAddress(B256);

impl UniversalAddress {
	pub fn from_evm(address: Address) -> Self {
		Self(B256::left_padding_from(address.as_slice()))
	}

	/// Parses an address written in the native form of `platform`.
	///
	/// A `0x` prefix is always read as hex, so zero-address placeholders for
	/// native tokens work on every platform. Hex values must be a full 20-byte
	/// EVM address or a full 32-byte word. Without the prefix, Solana values
	/// are decoded as base58 and must be exactly 32 bytes.
	pub fn parse(value: &str, platform: Platform) -> Result<Self, AddressError> {
		let value = value.trim();
		if let Some(digits) = value.strip_prefix("0x") {
			return Self::from_hex(value, digits);
		}
		match platform {
			Platform::Evm => Self::from_hex(value, value),
			Platform::Solana => {
				let bytes = bs58::decode(value)
					.into_vec()
					.map_err(|_| AddressError::InvalidBase58(value.to_string()))?;
				if bytes.len() != 32 {
					return Err(AddressError::InvalidSolanaLength(bytes.len()));
				}
				Ok(Self(B256::from_slice(&bytes)))
			}
		}
	}

	fn from_hex(original: &str, digits: &str) -> Result<Self, AddressError> {
		let bytes =
			hex::decode(digits).map_err(|_| AddressError::InvalidHex(original.to_string()))?;
		match bytes.len() {
			20 | 32 => Ok(Self(B256::left_padding_from(&bytes))),
			len => Err(AddressError::InvalidHexLength(len)),
		}
	}

	pub fn as_bytes32(&self) -> B256 {
		self.0
	}
}

impl From<UniversalAddress> for B256 {
	fn from(value: UniversalAddress) -> Self {
		value.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256};

	#[test]
	fn test_evm_address_left_padded() {
		let owner = address!("330cA32b71b81Ea2b1D3a5C391C5cFB6520E0A10");
		let universal = UniversalAddress::from_evm(owner);
		assert_eq!(
			universal.as_bytes32(),
			b256!("000000000000000000000000330ca32b71b81ea2b1d3a5c391c5cfb6520e0a10")
		);

		let parsed =
			UniversalAddress::parse("0x330cA32b71b81Ea2b1D3a5C391C5cFB6520E0A10", Platform::Evm)
				.unwrap();
		assert_eq!(parsed, universal);
	}

	#[test]
	fn test_solana_base58_decodes_to_32_bytes() {
		// System program id decodes to all zeros.
		let parsed =
			UniversalAddress::parse("11111111111111111111111111111111", Platform::Solana).unwrap();
		assert_eq!(parsed.as_bytes32(), B256::ZERO);

		let referrer = "8fFsLKGv5sizL97mjtrVvPu9trQAHZx5HBeLGzLVAt2o";
		let parsed = UniversalAddress::parse(referrer, Platform::Solana).unwrap();
		let expected = bs58::decode(referrer).into_vec().unwrap();
		assert_eq!(parsed.as_bytes32().as_slice(), expected.as_slice());
	}

	#[test]
	fn test_hex_prefix_wins_on_solana() {
		let parsed = UniversalAddress::parse(
			"0x0000000000000000000000000000000000000000",
			Platform::Solana,
		)
		.unwrap();
		assert_eq!(parsed.as_bytes32(), B256::ZERO);
	}

	#[test]
	fn test_rejects_bad_input() {
		assert!(matches!(
			UniversalAddress::parse("0xzz", Platform::Evm),
			Err(AddressError::InvalidHex(_))
		));
		assert!(matches!(
			UniversalAddress::parse("0OIl", Platform::Solana),
			Err(AddressError::InvalidBase58(_))
		));
		assert!(matches!(
			UniversalAddress::parse("2g", Platform::Solana),
			Err(AddressError::InvalidSolanaLength(_))
		));
		let too_long = format!("0x{}", "11".repeat(33));
		assert!(matches!(
			UniversalAddress::parse(&too_long, Platform::Evm),
			Err(AddressError::InvalidHexLength(33))
		));
	}

	#[test]
	fn test_short_hex_is_not_padded() {
		for platform in [Platform::Evm, Platform::Solana] {
			assert_eq!(
				UniversalAddress::parse("0x1234", platform),
				Err(AddressError::InvalidHexLength(2))
			);
			assert_eq!(
				UniversalAddress::parse("0x01", platform),
				Err(AddressError::InvalidHexLength(1))
			);
		}
		assert_eq!(
			UniversalAddress::parse("1234", Platform::Evm),
			Err(AddressError::InvalidHexLength(2))
		);

		let word = format!("0x{}", "ab".repeat(32));
		let parsed = UniversalAddress::parse(&word, Platform::Solana).unwrap();
		assert_eq!(parsed.as_bytes32(), B256::repeat_byte(0xab));
	}

	#[test]
	fn test_platform_for_chain() {
		assert_eq!(Platform::for_chain("solana"), Platform::Solana);
		assert_eq!(Platform::for_chain("Solana"), Platform::Solana);
		assert_eq!(Platform::for_chain("base"), Platform::Evm);
	}
}
