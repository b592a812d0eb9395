//! File-backed storage.
//!
//! Each key `namespace:id` maps to `<storage_path>/<namespace>/<id>.json`.
//! Each write goes to its own temp file in the target directory, which is
//! then renamed over the target. Readers never observe a partially written
//! document, and overlapping writes to one key resolve to the last rename.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use swiftx_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use tokio::fs;

pub struct FileStorage {
	/// Root directory; each namespace is a subdirectory.
	base_path: PathBuf,
}

impl FileStorage {
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	fn namespace_dir(&self, namespace: &str) -> PathBuf {
		if namespace.is_empty() {
			self.base_path.clone()
		} else {
			self.base_path.join(sanitize(namespace))
		}
	}

	fn get_file_path(&self, key: &str) -> PathBuf {
		let (namespace, id) = key.split_once(':').unwrap_or(("", key));
		self.namespace_dir(namespace)
			.join(format!("{}.json", sanitize(id)))
	}
}

fn sanitize(segment: &str) -> String {
	segment.replace(['/', '\\', ':'], "_")
}

fn backend_err(e: std::io::Error) -> StorageError {
	StorageError::Backend(e.to_string())
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		match fs::read(self.get_file_path(key)).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
			Err(e) => Err(backend_err(e)),
		}
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let path = self.get_file_path(key);
		let dir = path
			.parent()
			.map(PathBuf::from)
			.unwrap_or_else(|| self.base_path.clone());
		fs::create_dir_all(&dir).await.map_err(backend_err)?;

		tokio::task::spawn_blocking(move || -> std::io::Result<()> {
			let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
			temp.write_all(&value)?;
			temp.as_file().sync_all()?;
			temp.persist(&path).map_err(|e| e.error)?;
			Ok(())
		})
		.await
		.map_err(|e| StorageError::Backend(format!("write task failed: {}", e)))?
		.map_err(backend_err)
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		match fs::remove_file(self.get_file_path(key)).await {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(backend_err(e)),
		}
	}

	async fn list(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
		let mut entries = match fs::read_dir(self.namespace_dir(namespace)).await {
			Ok(entries) => entries,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(backend_err(e)),
		};

		let mut ids = Vec::new();
		while let Some(entry) = entries.next_entry().await.map_err(backend_err)? {
			let name = entry.file_name();
			if let Some(id) = name.to_str().and_then(|n| n.strip_suffix(".json")) {
				ids.push(id.to_string());
			}
		}
		ids.sort();
		Ok(ids)
	}
}

pub struct FileStorageSchema;

impl ConfigSchema for FileStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![Field::new("storage_path", FieldType::String).with_validator(|value| {
				match value.as_str() {
					Some(path) if path.trim().is_empty() => {
						Err("storage_path cannot be empty".to_string())
					}
					_ => Ok(()),
				}
			})],
		);
		schema.validate(config)
	}
}

/// Creates a file backend.
///
/// Configuration parameters:
/// - `storage_path`: base directory (default: "./data/orders")
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	FileStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.unwrap_or("./data/orders");

	Ok(Box::new(FileStorage::new(PathBuf::from(storage_path))))
}
