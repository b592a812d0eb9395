//! Schema validation for implementation-specific TOML sections.
//!
//! Chain, quote and storage backends each receive an opaque `toml::Value`
//! from the configuration file. Before a backend is constructed its factory
//! checks that table against a [`Schema`] so that mistakes are reported at
//! startup with the offending field path.

use thiserror::Error;

/// Errors produced while checking a table against a schema.
#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("Missing required field: {0}")]
	MissingField(String),
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
	#[error("Failed to deserialize config: {0}")]
	DeserializationError(String),
}

impl ValidationError {
	fn nested(self, parent: &str) -> Self {
		match self {
			Self::MissingField(f) => Self::MissingField(format!("{}.{}", parent, f)),
			Self::InvalidValue { field, message } => Self::InvalidValue {
				field: format!("{}.{}", parent, field),
				message,
			},
			Self::TypeMismatch {
				field,
				expected,
				actual,
			} => Self::TypeMismatch {
				field: format!("{}.{}", parent, field),
				expected,
				actual,
			},
			other => other,
		}
	}
}

/// Expected shape of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer { min: Option<i64>, max: Option<i64> },
	Boolean,
	/// A 0x-prefixed, 20-byte hex EVM address.
	Address,
	/// An `http://` or `https://` endpoint.
	Url,
	Array(Box<FieldType>),
	Table(Schema),
}

pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Attaches an extra check run after the type check succeeds.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		check_type(&self.name, value, &self.field_type)?;
		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}
		Ok(())
	}
}

/// Required and optional fields of a TOML table.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| mismatch("root", "table", config))?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

fn mismatch(field: &str, expected: &str, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: field.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

fn invalid(field: &str, message: String) -> ValidationError {
	ValidationError::InvalidValue {
		field: field.to_string(),
		message,
	}
}

fn check_type(name: &str, value: &toml::Value, expected: &FieldType) -> Result<(), ValidationError> {
	match expected {
		FieldType::String => {
			value.as_str().ok_or_else(|| mismatch(name, "string", value))?;
		}
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| mismatch(name, "integer", value))?;
			if let Some(min_val) = min.filter(|m| int_val < *m) {
				return Err(invalid(
					name,
					format!("Value {} is less than minimum {}", int_val, min_val),
				));
			}
			if let Some(max_val) = max.filter(|m| int_val > *m) {
				return Err(invalid(
					name,
					format!("Value {} is greater than maximum {}", int_val, max_val),
				));
			}
		}
		FieldType::Boolean => {
			value.as_bool().ok_or_else(|| mismatch(name, "boolean", value))?;
		}
		FieldType::Address => {
			let text = value.as_str().ok_or_else(|| mismatch(name, "address", value))?;
			let digits = text
				.strip_prefix("0x")
				.ok_or_else(|| invalid(name, format!("address {:?} must start with 0x", text)))?;
			if digits.len() != 40 || hex::decode(digits).is_err() {
				return Err(invalid(
					name,
					format!("address {:?} must be 20 bytes of hex", text),
				));
			}
		}
		FieldType::Url => {
			let text = value.as_str().ok_or_else(|| mismatch(name, "url", value))?;
			if !(text.starts_with("http://") || text.starts_with("https://")) {
				return Err(invalid(
					name,
					format!("url {:?} must use http or https", text),
				));
			}
		}
		FieldType::Array(inner) => {
			let array = value.as_array().ok_or_else(|| mismatch(name, "array", value))?;
			for (i, item) in array.iter().enumerate() {
				check_type(&format!("{}[{}]", name, i), item, inner)?;
			}
		}
		FieldType::Table(schema) => {
			schema.validate(value).map_err(|e| e.nested(name))?;
		}
	}

	Ok(())
}

/// Implemented by every backend factory to check its own TOML section.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chain_schema() -> Schema {
		Schema::new(
			vec![
				Field::new("rpc_url", FieldType::Url),
				Field::new("nonce_finder", FieldType::Address),
			],
			vec![Field::new(
				"chain_id",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
		)
	}

	#[test]
	fn test_valid_table_passes() {
		let value: toml::Value = toml::from_str(
			r#"
			rpc_url = "https://mainnet.base.org"
			nonce_finder = "0x09E158963a82834a6387bcedEbC0C9d245C4f74c"
			chain_id = 8453
			"#,
		)
		.unwrap();
		assert!(chain_schema().validate(&value).is_ok());
	}

	#[test]
	fn test_missing_and_malformed_fields() {
		let missing: toml::Value = toml::from_str(r#"rpc_url = "https://x""#).unwrap();
		assert!(matches!(
			chain_schema().validate(&missing),
			Err(ValidationError::MissingField(f)) if f == "nonce_finder"
		));

		let bad_address: toml::Value = toml::from_str(
			r#"
			rpc_url = "https://x"
			nonce_finder = "0x1234"
			"#,
		)
		.unwrap();
		assert!(matches!(
			chain_schema().validate(&bad_address),
			Err(ValidationError::InvalidValue { field, .. }) if field == "nonce_finder"
		));

		let bad_url: toml::Value = toml::from_str(
			r#"
			rpc_url = "ws://x"
			nonce_finder = "0x09E158963a82834a6387bcedEbC0C9d245C4f74c"
			"#,
		)
		.unwrap();
		assert!(chain_schema().validate(&bad_url).is_err());
	}

	#[test]
	fn test_nested_errors_carry_path() {
		let schema = Schema::new(
			vec![Field::new("inner", FieldType::Table(chain_schema()))],
			vec![],
		);
		let value: toml::Value = toml::from_str(
			r#"
			[inner]
			rpc_url = "https://x"
			nonce_finder = "0x09E158963a82834a6387bcedEbC0C9d245C4f74c"
			chain_id = 0
			"#,
		)
		.unwrap();
		match schema.validate(&value) {
			Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "inner.chain_id"),
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn test_custom_validator_runs() {
		let schema = Schema::new(
			vec![Field::new("base_url", FieldType::Url).with_validator(|v| {
				match v.as_str() {
					Some(s) if s.ends_with('/') => Err("must not end with a slash".to_string()),
					_ => Ok(()),
				}
			})],
			vec![],
		);
		let value: toml::Value = toml::from_str(r#"base_url = "https://price-api.mayan.finance/""#).unwrap();
		assert!(schema.validate(&value).is_err());
	}
}
