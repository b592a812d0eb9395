use crate::{StorageError, StorageService};
use alloy_primitives::B256;
use std::sync::Arc;
use swiftx_types::{witness_key, PartiallyBuiltOrder};
use tracing::{debug, warn};

pub const ORDERS_NAMESPACE: &str = "orders";

/// Persists orders keyed by their witness hash.
///
/// Documents are decoded back through the typed order schema, so integer
/// fields come back as the same widths they were written with.
#[derive(Clone)]
pub struct OrderStore {
	storage: Arc<StorageService>,
}

impl OrderStore {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	pub async fn add_order(
		&self,
		order: &PartiallyBuiltOrder,
		witness: &B256,
	) -> Result<(), StorageError> {
		let key = witness_key(witness);
		debug!(witness = %key, "storing order");
		self.storage.store(ORDERS_NAMESPACE, &key, order).await
	}

	pub async fn get_order(
		&self,
		witness: &B256,
	) -> Result<Option<PartiallyBuiltOrder>, StorageError> {
		match self
			.storage
			.retrieve(ORDERS_NAMESPACE, &witness_key(witness))
			.await
		{
			Ok(order) => Ok(Some(order)),
			Err(StorageError::NotFound) => Ok(None),
			Err(e) => Err(e),
		}
	}

	pub async fn get_orders(&self) -> Result<Vec<PartiallyBuiltOrder>, StorageError> {
		let ids = self.storage.list(ORDERS_NAMESPACE).await?;
		let mut orders = Vec::with_capacity(ids.len());
		for id in ids {
			match self.storage.retrieve(ORDERS_NAMESPACE, &id).await {
				Ok(order) => orders.push(order),
				// Deleted between listing and reading.
				Err(StorageError::NotFound) => {}
				Err(StorageError::Serialization(e)) => {
					warn!(id = %id, error = %e, "skipping undecodable order document");
				}
				Err(e) => return Err(e),
			}
		}
		Ok(orders)
	}

	pub async fn delete_order(&self, witness: &B256) -> Result<(), StorageError> {
		self.storage
			.remove(ORDERS_NAMESPACE, &witness_key(witness))
			.await
	}
}
