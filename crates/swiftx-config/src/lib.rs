//! Configuration loading for the SwiftX relay.
//!
//! Configuration is a TOML file. Before parsing, every `${VAR}` occurrence is
//! replaced with the value of the environment variable `VAR`; a missing
//! variable is an error. After parsing, a few `SWIFTX_*` variables override
//! service settings, and the result is validated.

use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod types;

pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	/// The config file path does not exist.
	#[error("File not found: {0}")]
	FileNotFound(String),

	/// The file is not valid TOML or does not match the config model.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// The config parsed but breaks a cross-field rule.
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// A `${VAR}` reference names an unset variable.
	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	/// Reading the file failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "SWIFTX_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<Config, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;

		let content = match tokio::fs::read_to_string(file_path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(file_path.display().to_string()))
			}
			Err(e) => return Err(e.into()),
		};

		self.parse(&content)
	}

	/// Runs substitution, overrides and validation on TOML text.
	pub fn parse(&self, content: &str) -> Result<Config, ConfigError> {
		let substituted = substitute_env_vars(content)?;
		let mut config: Config =
			toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))?;

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	fn apply_env_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
		if let Ok(host) = env::var(format!("{}HOST", self.env_prefix)) {
			config.service.host = host;
		}

		if let Ok(port) = env::var(format!("{}PORT", self.env_prefix)) {
			config.service.port = port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid port: {}", e)))?;
		}

		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.service.log_level = log_level;
		}

		Ok(())
	}
}

fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;
	let mut result = content.to_string();

	for cap in re.captures_iter(content) {
		let var_name = &cap[1];
		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(&cap[0], &value);
	}

	Ok(result)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
	if !config.chains.values().any(|c| c.integrated) {
		return Err(ConfigError::ValidationError(
			"At least one chain must be integrated".to_string(),
		));
	}

	for (name, chain) in config.chains.iter().filter(|(_, c)| c.integrated) {
		match chain.rpc_url.as_deref() {
			Some(url) if !url.trim().is_empty() => {}
			_ => {
				return Err(ConfigError::ValidationError(format!(
					"Integrated chain '{}' has no rpc_url",
					name
				)))
			}
		}
	}

	if config.order.execution_window_secs == 0 {
		return Err(ConfigError::ValidationError(
			"order.execution_window_secs must be greater than zero".to_string(),
		));
	}

	// Stored on-chain as uint8, which is tighter than the 10000 bps ceiling.
	if config.order.referrer_bps > u8::MAX as u16 {
		return Err(ConfigError::ValidationError(format!(
			"order.referrer_bps {} does not fit in uint8",
			config.order.referrer_bps
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, B256};
	use std::io::Write;

	const BASE_CONFIG: &str = r#"
		[service]
		port = 3000

		[chains.base]
		integrated = true
		token_standard = "erc20"
		chain_id = 8453
		rpc_url = "https://mainnet.base.org"
		referrer = "0x330cA32b71b81Ea2b1D3a5C391C5cFB6520E0A10"

		[chains.solana]
		token_standard = "spl"
		referrer = "8fFsLKGv5sizL97mjtrVvPu9trQAHZx5HBeLGzLVAt2o"

		[quote]
		backend = "mayan"
		config = { base_url = "https://price-api.mayan.finance" }

		[price_feed]
		backend = "pyth"

		[storage]
		backend = "memory"
	"#;

	#[test]
	fn test_defaults_applied() {
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_DEFAULTS_")
			.parse(BASE_CONFIG)
			.unwrap();

		assert_eq!(config.order.execution_window_secs, 600);
		assert_eq!(config.order.referrer_bps, 2);
		assert_ne!(config.order.random, B256::ZERO);
		assert_eq!(
			config.contracts.swift,
			address!("5D9C504b3F02611912Af20ED39E60C539621E678")
		);
		assert!(config.is_integrated("base"));
		assert!(!config.is_integrated("solana"));
		assert!(!config.is_integrated("ethereum"));
		assert_eq!(config.integrated_chains().len(), 2);
	}

	#[test]
	fn test_env_substitution() {
		env::set_var("SWIFTX_TEST_SUB_RPC", "https://rpc.example");
		let content = BASE_CONFIG.replace("https://mainnet.base.org", "${SWIFTX_TEST_SUB_RPC}");
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_SUB_")
			.parse(&content)
			.unwrap();
		assert_eq!(
			config.chains["base"].rpc_url.as_deref(),
			Some("https://rpc.example")
		);

		let missing = BASE_CONFIG.replace("https://mainnet.base.org", "${SWIFTX_TEST_SUB_UNSET}");
		assert!(matches!(
			ConfigLoader::new().parse(&missing),
			Err(ConfigError::EnvVarNotFound(v)) if v == "SWIFTX_TEST_SUB_UNSET"
		));
	}

	#[test]
	fn test_env_overrides() {
		env::set_var("SWIFTX_TEST_OVR_PORT", "8080");
		env::set_var("SWIFTX_TEST_OVR_HOST", "127.0.0.1");
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_OVR_")
			.parse(BASE_CONFIG)
			.unwrap();
		assert_eq!(config.service.port, 8080);
		assert_eq!(config.service.host, "127.0.0.1");
		assert_eq!(config.service.log_level, "info");

		let with_level = BASE_CONFIG.replace("port = 3000", "port = 3000\nlog_level = \"warn\"");
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_LOGFILE_")
			.parse(&with_level)
			.unwrap();
		assert_eq!(config.service.log_level, "warn");

		env::set_var("SWIFTX_TEST_LOG_LOG_LEVEL", "swiftx_core=debug");
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_LOG_")
			.parse(&with_level)
			.unwrap();
		assert_eq!(config.service.log_level, "swiftx_core=debug");

		env::set_var("SWIFTX_TEST_BADPORT_PORT", "not-a-port");
		assert!(ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_BADPORT_")
			.parse(BASE_CONFIG)
			.is_err());
	}

	#[test]
	fn test_validation_rules() {
		let loader = ConfigLoader::new().with_env_prefix("SWIFTX_TEST_VALID_");

		let no_rpc = BASE_CONFIG.replace("rpc_url = \"https://mainnet.base.org\"", "");
		assert!(matches!(
			loader.parse(&no_rpc),
			Err(ConfigError::ValidationError(m)) if m.contains("rpc_url")
		));

		let none_integrated = BASE_CONFIG.replace("integrated = true", "integrated = false");
		assert!(loader.parse(&none_integrated).is_err());

		let zero_window = format!("{}\n[order]\nexecution_window_secs = 0\n", BASE_CONFIG);
		assert!(loader.parse(&zero_window).is_err());

		let wide_bps = format!("{}\n[order]\nreferrer_bps = 300\n", BASE_CONFIG);
		assert!(loader.parse(&wide_bps).is_err());
	}

	#[test]
	fn test_chain_backend_config() {
		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_BACKEND_")
			.parse(BASE_CONFIG)
			.unwrap();
		let value = config.chain_backend_config(&config.chains["base"]);
		assert_eq!(value["rpc_url"].as_str(), Some("https://mainnet.base.org"));
		assert!(value.get("chain_id").is_none());
		assert_eq!(
			value["nonce_finder"].as_str(),
			Some("0x09E158963a82834a6387bcedEbC0C9d245C4f74c")
		);
	}

	#[tokio::test]
	async fn test_load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(BASE_CONFIG.as_bytes()).unwrap();

		let config = ConfigLoader::new()
			.with_env_prefix("SWIFTX_TEST_FILE_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.quote.backend, "mayan");

		let missing = ConfigLoader::new()
			.with_file("/nonexistent/swiftx.toml")
			.load()
			.await;
		assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));
	}
}
