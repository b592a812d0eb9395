//! Serde helpers for integers carried as decimal strings.
//!
//! Order payloads travel through JSON, which cannot hold a uint256 or a full
//! 64-bit integer without loss. Every wide integer is therefore written as a
//! base-10 string. Reading accepts either a string or a JSON number so that
//! hand-written requests with small values still parse.

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
	Text(String),
	Unsigned(u64),
	Signed(i64),
}

/// Decimal string encoding for `U256`.
pub mod u256_decimal {
	use super::*;
	use alloy_primitives::U256;

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		match DecimalRepr::deserialize(deserializer)? {
			DecimalRepr::Text(text) => parse_u256(&text).map_err(D::Error::custom),
			DecimalRepr::Unsigned(value) => Ok(U256::from(value)),
			DecimalRepr::Signed(value) => u64::try_from(value)
				.map(U256::from)
				.map_err(|_| D::Error::custom(format!("negative value {} for uint256", value))),
		}
	}

	/// Parses a base-10 string into a `U256`.
	pub fn parse_u256(text: &str) -> Result<U256, String> {
		if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
			return Err(format!("invalid decimal integer: {:?}", text));
		}
		U256::from_str_radix(text, 10).map_err(|e| format!("invalid uint256 {:?}: {}", text, e))
	}
}

/// Decimal string encoding for `u64`.
pub mod u64_decimal {
	use super::*;

	pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
	where
		D: Deserializer<'de>,
	{
		match DecimalRepr::deserialize(deserializer)? {
			DecimalRepr::Text(text) => text
				.parse::<u64>()
				.map_err(|e| D::Error::custom(format!("invalid uint64 {:?}: {}", text, e))),
			DecimalRepr::Unsigned(value) => Ok(value),
			DecimalRepr::Signed(value) => u64::try_from(value)
				.map_err(|_| D::Error::custom(format!("negative value {} for uint64", value))),
		}
	}
}

/// Decimal string encoding for `i64`.
pub mod i64_decimal {
	use super::*;

	pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
	where
		D: Deserializer<'de>,
	{
		match DecimalRepr::deserialize(deserializer)? {
			DecimalRepr::Text(text) => text
				.parse::<i64>()
				.map_err(|e| D::Error::custom(format!("invalid int64 {:?}: {}", text, e))),
			DecimalRepr::Unsigned(value) => i64::try_from(value)
				.map_err(|_| D::Error::custom(format!("value {} overflows int64", value))),
			DecimalRepr::Signed(value) => Ok(value),
		}
	}
}
