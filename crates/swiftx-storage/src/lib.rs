//! Storage for relay documents.
//!
//! Backends implement [`StorageInterface`], a byte-oriented key-value store
//! whose keys are `namespace:id`. [`StorageService`] adds JSON typing on top,
//! and [`OrderStore`] is the order persistence adapter used by the engine.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub mod implementations {
	pub mod file;
	pub mod memory;
}

mod orders;

pub use orders::{OrderStore, ORDERS_NAMESPACE};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The requested key does not exist.
	#[error("Not found")]
	NotFound,
	/// A document could not be encoded or decoded as JSON.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// The backend failed, typically an I/O error.
	#[error("Backend error: {0}")]
	Backend(String),
	/// The backend's configuration table is invalid.
	#[error("Invalid configuration: {0}")]
	Configuration(String),
}

/// Low-level key-value operations every backend provides.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes, replacing any previous value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes a key. Deleting a missing key succeeds.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Lists the ids stored under `namespace`, without the namespace prefix.
	async fn list(&self, namespace: &str) -> Result<Vec<String>, StorageError>;
}

/// Builds the backend key for an id inside a namespace.
pub fn compose_key(namespace: &str, id: &str) -> String {
	format!("{}:{}", namespace, id)
}

/// Typed JSON storage over a backend.
pub struct StorageService {
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	pub async fn store<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend
			.set_bytes(&compose_key(namespace, id), bytes)
			.await
	}

	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let bytes = self.backend.get_bytes(&compose_key(namespace, id)).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		self.backend.delete(&compose_key(namespace, id)).await
	}

	pub async fn list(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
		self.backend.list(namespace).await
	}
}
